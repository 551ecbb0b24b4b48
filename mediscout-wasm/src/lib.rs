//! Framework-neutral bridge between the MediScout engine and JavaScript.
//!
//! Every call reads its state back from `localStorage`, so the page can be
//! reloaded at any point without losing the cohort or the session.

use chrono::{DateTime, NaiveDate, Utc};
use mediscout_core::{
    CohortConfig, ImageDescriptor, MatcherConfig, MediscoutError, PatientRecord, Registration,
};
use mediscout_engine::explorer::distinct_conditions;
use mediscout_engine::{
    cohort_analytics, explore, export_csv, submit_health_record as submit_record, AccountStore,
    CohortCache, ExplorerQuery, HealthSubmission, KeyValueStore, SymptomMatcher,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsCohortConfig {
    #[serde(default)]
    per_condition_count: Option<usize>,
    #[serde(default)]
    max_cohort_size: Option<usize>,
    #[serde(default)]
    lookback_days: Option<u32>,
    #[serde(default)]
    cache_key: Option<String>,
}

impl From<JsCohortConfig> for CohortConfig {
    fn from(cfg: JsCohortConfig) -> Self {
        let mut base = CohortConfig::default();
        if let Some(count) = cfg.per_condition_count {
            base.per_condition_count = count;
        }
        if let Some(max) = cfg.max_cohort_size {
            base.max_cohort_size = max;
        }
        if let Some(days) = cfg.lookback_days {
            base.lookback_days = days;
        }
        if let Some(key) = cfg.cache_key {
            base.cache_key = key;
        }
        base
    }
}

#[cfg(target_arch = "wasm32")]
struct LocalStorage(web_sys::Storage);

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), MediscoutError> {
        self.0
            .set_item(key, &value)
            .map_err(|err| MediscoutError::Storage(format!("{err:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), MediscoutError> {
        self.0
            .remove_item(key)
            .map_err(|err| MediscoutError::Storage(format!("{err:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
fn with_store<T>(
    f: impl FnOnce(&mut dyn KeyValueStore) -> Result<T, MediscoutError>,
) -> Result<T, JsValue> {
    let storage = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .ok_or_else(|| JsValue::from_str("localStorage is not available"))?;
    f(&mut LocalStorage(storage)).map_err(|err| JsValue::from_str(&format_error(err)))
}

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static STORE: std::cell::RefCell<mediscout_engine::MemoryStore> =
        std::cell::RefCell::new(mediscout_engine::MemoryStore::new());
}

#[cfg(not(target_arch = "wasm32"))]
fn with_store<T>(
    f: impl FnOnce(&mut dyn KeyValueStore) -> Result<T, MediscoutError>,
) -> Result<T, JsValue> {
    STORE
        .with(|store| f(&mut *store.borrow_mut()))
        .map_err(|err| JsValue::from_str(&format_error(err)))
}

fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

fn now() -> DateTime<Utc> {
    Utc::now()
}

fn today() -> NaiveDate {
    now().date_naive()
}

fn read_config(config: Option<JsValue>) -> Result<CohortConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsCohortConfig = read_input(js_cfg, "config")?;
            Ok(CohortConfig::from(cfg))
        }
        _ => Ok(CohortConfig::default()),
    }
}

fn read_input<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    from_value(value).map_err(|err| JsValue::from_str(&format!("Could not read {what}: {err}")))
}

fn write_output<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(|err| JsValue::from_str(&format!("Could not serialize result: {err}")))
}

fn load_cohort(config: CohortConfig) -> Result<Vec<PatientRecord>, JsValue> {
    with_store(|store| CohortCache::new(store, config).get_cohort(&mut rand::thread_rng(), today()))
}

/// Validation messages go to the user as-is; anything else is tagged.
fn format_error(err: MediscoutError) -> String {
    if err.is_validation() {
        err.to_string()
    } else {
        format!("MediScout error: {err}")
    }
}

/// The cached cohort, generated on first use.
#[wasm_bindgen]
pub fn get_cohort(config: Option<JsValue>) -> Result<JsValue, JsValue> {
    init();
    let cohort = load_cohort(read_config(config)?)?;
    write_output(&cohort)
}

#[wasm_bindgen]
pub fn regenerate_cohort(config: Option<JsValue>) -> Result<JsValue, JsValue> {
    init();
    let config = read_config(config)?;
    let cohort = with_store(|store| {
        CohortCache::new(store, config).regenerate_cohort(&mut rand::thread_rng(), today())
    })?;
    write_output(&cohort)
}

/// CSV text of the cached cohort, or `undefined` when there is nothing to
/// export. The page saves it as `mediscout_synthetic_data.csv`.
#[wasm_bindgen]
pub fn export_cohort_csv(config: Option<JsValue>) -> Result<Option<String>, JsValue> {
    init();
    let cohort = load_cohort(read_config(config)?)?;
    export_csv(&cohort).map_err(|err| JsValue::from_str(&format_error(err)))
}

#[wasm_bindgen]
pub fn cohort_dashboard(config: Option<JsValue>) -> Result<JsValue, JsValue> {
    init();
    let cohort = load_cohort(read_config(config)?)?;
    write_output(&cohort_analytics(&cohort))
}

/// Explorer rows for a `{ search, condition, sortKey, direction }` query.
#[wasm_bindgen]
pub fn explore_cohort(query: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    init();
    let query: ExplorerQuery = read_input(query, "explorer query")?;
    let cohort = load_cohort(read_config(config)?)?;
    write_output(&explore(&cohort, &query))
}

#[wasm_bindgen]
pub fn cohort_conditions(config: Option<JsValue>) -> Result<JsValue, JsValue> {
    init();
    let cohort = load_cohort(read_config(config)?)?;
    write_output(&distinct_conditions(&cohort))
}

/// Immediate prediction. The page applies [`matcher_latency_ms`] itself.
#[wasm_bindgen]
pub fn predict_symptoms(symptoms: &str, image: Option<JsValue>) -> Result<JsValue, JsValue> {
    init();
    let image: Option<ImageDescriptor> = match image {
        Some(value) if !value.is_undefined() && !value.is_null() => {
            Some(read_input(value, "image descriptor")?)
        }
        _ => None,
    };
    write_output(&SymptomMatcher::default().predict(symptoms, image.as_ref()))
}

#[wasm_bindgen]
pub fn matcher_latency_ms() -> f64 {
    MatcherConfig::default().latency_ms as f64
}

#[wasm_bindgen]
pub fn register(registration: JsValue) -> Result<JsValue, JsValue> {
    init();
    let registration: Registration = read_input(registration, "registration")?;
    let account = with_store(|store| {
        let mut accounts = AccountStore::new(store);
        let mut session = accounts.restore_session();
        accounts.register(&mut session, registration, now())
    })?;
    write_output(&account)
}

#[wasm_bindgen]
pub fn login(username: &str, password: &str) -> Result<JsValue, JsValue> {
    init();
    let account = with_store(|store| {
        let mut accounts = AccountStore::new(store);
        let mut session = accounts.restore_session();
        accounts.login(&mut session, username, password)
    })?;
    write_output(&account)
}

#[wasm_bindgen]
pub fn logout() -> Result<(), JsValue> {
    init();
    with_store(|store| {
        let mut accounts = AccountStore::new(store);
        let mut session = accounts.restore_session();
        accounts.logout(&mut session)
    })
}

/// The logged-in account, or `undefined`.
#[wasm_bindgen]
pub fn current_user() -> Result<JsValue, JsValue> {
    init();
    let session = with_store(|store| Ok(AccountStore::new(store).restore_session()))?;
    write_output(&session.current_user())
}

#[wasm_bindgen]
pub fn submit_health_record(form: JsValue) -> Result<JsValue, JsValue> {
    init();
    let form: HealthSubmission = read_input(form, "health entry")?;
    let record = with_store(|store| {
        let mut accounts = AccountStore::new(store);
        let mut session = accounts.restore_session();
        submit_record(
            &mut accounts,
            &mut session,
            &SymptomMatcher::default(),
            form,
            now(),
        )
    })?;
    write_output(&record)
}
