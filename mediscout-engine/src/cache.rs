//! Keeps one assembled cohort in a key-value store so repeated views share a
//! stable dataset until it is explicitly regenerated.

use chrono::NaiveDate;
use log::{debug, warn};
use mediscout_core::{CohortConfig, MediscoutError, PatientRecord};
use rand::Rng;

use crate::cohort::assemble_cohort;
use crate::store::KeyValueStore;

pub struct CohortCache<S> {
    store: S,
    config: CohortConfig,
}

impl<S: KeyValueStore> CohortCache<S> {
    pub fn new(store: S, config: CohortConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &CohortConfig {
        &self.config
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Returns the stored cohort, generating and storing a fresh one when
    /// nothing valid is stored. Unreadable data is discarded, never returned
    /// as an error.
    pub fn get_cohort<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        today: NaiveDate,
    ) -> Result<Vec<PatientRecord>, MediscoutError> {
        if let Some(cohort) = self.load()? {
            return Ok(cohort);
        }
        self.generate_and_store(rng, today)
    }

    /// Drops the stored cohort and replaces it with a new one.
    pub fn regenerate_cohort<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        today: NaiveDate,
    ) -> Result<Vec<PatientRecord>, MediscoutError> {
        self.store.remove(&self.config.cache_key)?;
        self.generate_and_store(rng, today)
    }

    /// The stored cohort if it passes validation, without generating.
    pub fn cached(&self) -> Option<Vec<PatientRecord>> {
        let raw = self.store.get(&self.config.cache_key)?;
        parse_cohort(&raw)
    }

    fn load(&mut self) -> Result<Option<Vec<PatientRecord>>, MediscoutError> {
        let key = self.config.cache_key.clone();
        let Some(raw) = self.store.get(&key) else {
            return Ok(None);
        };

        match parse_cohort(&raw) {
            Some(cohort) => Ok(Some(cohort)),
            None => {
                warn!("discarding malformed cohort stored under {key}");
                self.store.remove(&key)?;
                Ok(None)
            }
        }
    }

    fn generate_and_store<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        today: NaiveDate,
    ) -> Result<Vec<PatientRecord>, MediscoutError> {
        let cohort = assemble_cohort(rng, today, &self.config);
        let serialized = serde_json::to_string(&cohort)
            .map_err(|err| MediscoutError::Serialization(err.to_string()))?;
        self.store.set(&self.config.cache_key, serialized)?;
        debug!(
            "stored cohort of {} records under {}",
            cohort.len(),
            self.config.cache_key
        );
        Ok(cohort)
    }
}

/// A stored cohort is usable when it deserializes into the current record
/// schema, is non-empty and every record carries an id.
fn parse_cohort(raw: &str) -> Option<Vec<PatientRecord>> {
    let cohort: Vec<PatientRecord> = serde_json::from_str(raw).ok()?;
    if cohort.is_empty() || cohort.iter().any(|record| record.id.is_empty()) {
        return None;
    }
    Some(cohort)
}
