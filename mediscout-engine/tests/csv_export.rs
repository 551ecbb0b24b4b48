use std::fs;

use mediscout_core::PatientRecord;
use mediscout_engine::export_csv;
use pretty_assertions::assert_eq;
use serde_json::Value;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn load_records() -> Vec<PatientRecord> {
    let data = fs::read_to_string(fixture_path("two_records.json")).expect("cannot read fixture");
    serde_json::from_str(&data).expect("fixture is not a record list")
}

#[test]
fn two_record_export_matches_golden() {
    let records = load_records();

    let csv = export_csv(&records)
        .expect("export failed")
        .expect("non-empty input must export");

    let golden = fs::read_to_string(fixture_path("two_records.csv")).expect("cannot read golden");
    let expected = golden.lines().collect::<Vec<_>>().join("\r\n");

    assert_eq!(csv, expected);
}

#[test]
fn header_has_one_column_per_flattened_field() {
    let records = load_records();
    let csv = export_csv(&records).unwrap().unwrap();
    let lines: Vec<&str> = csv.split("\r\n").collect();

    assert_eq!(lines.len(), 1 + records.len());
    let header: Vec<&str> = lines[0].split(',').collect();
    // 10 scalar fields + 4 vitals + 2 image analysis fields
    assert_eq!(header.len(), 16);
    assert!(header.contains(&"vitals_temperature"));
    assert!(header.contains(&"aiImage_confidence"));
    assert!(!header.contains(&"vitals"));
    assert!(!header.contains(&"simulatedAiImageAnalysis"));
}

#[test]
fn empty_export_is_a_no_op() {
    let records: Vec<PatientRecord> = Vec::new();
    assert_eq!(export_csv(&records).unwrap(), None);
}

#[test]
fn other_nested_objects_are_kept_as_json_text() {
    let rows = vec![serde_json::json!({
        "id": "x1",
        "extra": { "note": "a \"quoted\" word" },
        "missing": null
    })];

    let csv = export_csv(&rows).unwrap().unwrap();
    let mut lines = csv.split("\r\n");
    assert_eq!(lines.next(), Some("id,extra,missing"));

    let row = lines.next().unwrap();
    let (id, rest) = row.split_once(',').unwrap();
    assert_eq!(id, "\"x1\"");
    let (extra, missing) = rest.rsplit_once(',').unwrap();
    assert_eq!(missing, "\"\"");
    let decoded: String = serde_json::from_str(extra).unwrap();
    let nested: Value = serde_json::from_str(&decoded).unwrap();
    assert_eq!(nested["note"], "a \"quoted\" word");
}
