//! SqliteStore — owns the connection pool and implements IOutcomeStore.

use std::collections::BTreeSet;
use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use augur_core::config::{RetentionConfig, StorageConfig};
use augur_core::errors::AugurResult;
use augur_core::models::{FormulaSet, Mode, Observation, PredictionRecord, SetCounters};
use augur_core::traits::{IOutcomeStore, TrimReport};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{formula_set_ops, observation_ops, prediction_ops, retention_ops};

pub struct SqliteStore {
    pool: ConnectionPool,
}

impl SqliteStore {
    /// Open a file-backed store with default pool settings.
    pub fn open(path: &Path) -> AugurResult<Self> {
        Self::open_with(path, &StorageConfig::default())
    }

    pub fn open_with(path: &Path, config: &StorageConfig) -> AugurResult<Self> {
        let pool = ConnectionPool::open(path, config.read_pool_size, config.busy_timeout_ms)?;
        let store = Self { pool };
        store.initialize()?;
        debug!(path = %path.display(), readers = config.read_pool_size, "store opened");
        Ok(store)
    }

    /// In-memory store. All reads go through the writer.
    pub fn open_in_memory() -> AugurResult<Self> {
        let store = Self {
            pool: ConnectionPool::open_in_memory()?,
        };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> AugurResult<()> {
        self.with_writer(|conn| migrations::run_migrations(conn).map(|_| ()))
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    pub fn schema_version(&self) -> AugurResult<u32> {
        self.pool.writer.with_conn_sync(migrations::current_version)
    }

    pub fn observation_count(&self) -> AugurResult<usize> {
        self.with_reader(observation_ops::count_observations)
    }

    fn with_reader<F, T>(&self, f: F) -> AugurResult<T>
    where
        F: FnOnce(&Connection) -> AugurResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn_sync(f),
        }
    }

    fn with_writer<F, T>(&self, f: F) -> AugurResult<T>
    where
        F: FnOnce(&Connection) -> AugurResult<T>,
    {
        self.pool.writer.with_conn_sync(f)
    }
}

impl IOutcomeStore for SqliteStore {
    fn insert_observations(&self, observations: &[Observation]) -> AugurResult<usize> {
        self.with_writer(|conn| observation_ops::insert_observations(conn, observations))
    }

    fn all_observations(&self) -> AugurResult<Vec<Observation>> {
        self.with_reader(observation_ops::all_observations)
    }

    fn active_formula_set(&self, mode: Mode) -> AugurResult<Option<FormulaSet>> {
        self.with_reader(|conn| formula_set_ops::active_formula_set(conn, mode))
    }

    fn activate_formula_set(&self, set: &FormulaSet) -> AugurResult<()> {
        self.with_writer(|conn| formula_set_ops::activate_formula_set(conn, set))
    }

    fn record_set_outcome(&self, set_id: &str, correct: bool) -> AugurResult<Option<SetCounters>> {
        let counters =
            self.with_writer(|conn| formula_set_ops::record_set_outcome(conn, set_id, correct))?;
        if counters.is_none() {
            debug!(set_id, "outcome matched no formula set");
        }
        Ok(counters)
    }

    fn formula_sets(&self, mode: Mode, limit: usize) -> AugurResult<Vec<FormulaSet>> {
        self.with_reader(|conn| formula_set_ops::formula_sets(conn, mode, limit))
    }

    fn insert_prediction(&self, record: &PredictionRecord) -> AugurResult<bool> {
        self.with_writer(|conn| prediction_ops::insert_prediction(conn, record))
    }

    fn get_prediction(&self, period_id: &str, mode: Mode) -> AugurResult<Option<PredictionRecord>> {
        self.with_reader(|conn| prediction_ops::get_prediction(conn, period_id, mode))
    }

    fn unresolved_predictions(&self, mode: Mode) -> AugurResult<Vec<PredictionRecord>> {
        self.with_reader(|conn| prediction_ops::unresolved_predictions(conn, mode))
    }

    fn predicted_periods(&self, mode: Mode) -> AugurResult<BTreeSet<String>> {
        self.with_reader(|conn| prediction_ops::predicted_periods(conn, mode))
    }

    fn resolve_prediction(&self, period_id: &str, mode: Mode, correct: bool) -> AugurResult<bool> {
        self.with_writer(|conn| prediction_ops::resolve_prediction(conn, period_id, mode, correct))
    }

    fn trim(&self, retention: &RetentionConfig) -> AugurResult<TrimReport> {
        self.with_writer(|conn| retention_ops::trim(conn, retention))
    }
}
