use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, StoreError};
use crate::telemetry::Metrics;
use crate::template::reduce;
use crate::trend::{classify_metrics, TrendConfig};
use crate::types::{LogRecord, MeasurementTuple, TemplateType, TrendVerdict};

/// Lagringslaget motoren leser fra.
pub trait LogStore {
    /// De `limit` nyeste loggene for øvelsen, nyeste først.
    fn fetch_recent_logs(
        &self,
        exercise_id: u64,
        limit: usize,
    ) -> Result<Vec<MeasurementTuple>, StoreError>;

    fn fetch_exercise_template_type(&self, exercise_id: u64) -> Result<TemplateType, StoreError>;
}

impl<S: LogStore + ?Sized> LogStore for &S {
    fn fetch_recent_logs(
        &self,
        exercise_id: u64,
        limit: usize,
    ) -> Result<Vec<MeasurementTuple>, StoreError> {
        (**self).fetch_recent_logs(exercise_id, limit)
    }

    fn fetch_exercise_template_type(&self, exercise_id: u64) -> Result<TemplateType, StoreError> {
        (**self).fetch_exercise_template_type(exercise_id)
    }
}

/// getTrend: henter logger, reduserer og klassifiserer. Holder ingen tilstand
/// mellom kall utover tellerne.
pub struct TrendEngine<S: LogStore> {
    store: S,
    config: TrendConfig,
    metrics: Metrics,
}

impl<S: LogStore> TrendEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: TrendConfig::default(),
            metrics: Metrics::global().clone(),
        }
    }

    pub fn with_config(mut self, config: TrendConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get_trend(&self, exercise_id: u64) -> Result<TrendVerdict, EngineError> {
        let template = self.store.fetch_exercise_template_type(exercise_id)?;
        let logs = self.store.fetch_recent_logs(exercise_id, self.config.fetch_limit)?;

        let derived: Vec<f64> = logs.iter().map(|m| reduce(template, m)).collect();
        let dropped = derived.len() - derived.iter().filter(|v| **v > 0.0).count();
        if dropped > 0 {
            debug!(
                "exercise {}: {} of {} logs without valid {} metric",
                exercise_id,
                dropped,
                logs.len(),
                template
            );
            self.metrics.record_filtered(dropped);
        }

        let verdict = classify_metrics(&derived, &self.config);
        self.metrics.record_verdict(verdict.state);
        info!(
            "exercise {} ({}): trend={} sessions={}",
            exercise_id,
            template,
            verdict.state.as_str(),
            verdict.session_count
        );
        Ok(verdict)
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// In-memory lagring (referanse-implementasjon + tester)
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub id: u64,
    pub template_type: TemplateType,
}

/// Serialiserbart øyeblikksbilde av en `MemoryLogStore`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Logbook {
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
    #[serde(default)]
    pub logs: Vec<LogRecord>,
}

#[derive(Debug, Default)]
struct Inner {
    exercises: HashMap<u64, TemplateType>,
    logs: HashMap<u64, Vec<LogRecord>>,
}

/// Trådsikker lagring i minnet.
///
/// Malen låses når første logg finnes: gamle rå-målinger tolkes ellers
/// med en annen formel enn de ble logget under.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Backend("store mutex poisoned".into()))
    }

    /// Registrerer en øvelse. Finnes id-en fra før gjelder samme regel som
    /// for `set_template_type`: ny mal avvises når logger finnes.
    pub fn add_exercise(&self, id: u64, template: TemplateType) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        if inner.exercises.contains_key(&id) {
            return Self::retemplate(&mut inner, id, template);
        }
        inner.exercises.insert(id, template);
        Ok(())
    }

    pub fn set_template_type(&self, id: u64, template: TemplateType) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        Self::retemplate(&mut inner, id, template)
    }

    fn retemplate(inner: &mut Inner, id: u64, template: TemplateType) -> Result<(), StoreError> {
        let current = *inner
            .exercises
            .get(&id)
            .ok_or(StoreError::ExerciseNotFound(id))?;
        if current == template {
            return Ok(());
        }
        if inner.logs.get(&id).map_or(false, |l| !l.is_empty()) {
            return Err(StoreError::TemplateFrozen(id));
        }
        inner.exercises.insert(id, template);
        Ok(())
    }

    pub fn append_log(&self, record: LogRecord) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        if !inner.exercises.contains_key(&record.exercise_id) {
            return Err(StoreError::ExerciseNotFound(record.exercise_id));
        }
        let logs = inner.logs.entry(record.exercise_id).or_default();
        // hold listen sortert nyeste først (stabil ved like tidsstempler)
        let pos = logs.partition_point(|l| l.created_at >= record.created_at);
        logs.insert(pos, record);
        Ok(())
    }

    pub fn log_count(&self, exercise_id: u64) -> Result<usize, StoreError> {
        Ok(self.lock()?.logs.get(&exercise_id).map_or(0, Vec::len))
    }

    pub fn snapshot(&self) -> Result<Logbook, StoreError> {
        let inner = self.lock()?;
        let mut exercises: Vec<ExerciseEntry> = inner
            .exercises
            .iter()
            .map(|(id, t)| ExerciseEntry { id: *id, template_type: *t })
            .collect();
        exercises.sort_by_key(|e| e.id);

        let mut ids: Vec<&u64> = inner.logs.keys().collect();
        ids.sort();
        let logs = ids
            .into_iter()
            .flat_map(|id| inner.logs[id].iter().cloned())
            .collect();
        Ok(Logbook { exercises, logs })
    }

    pub fn from_logbook(book: Logbook) -> Result<Self, StoreError> {
        let store = Self::new();
        let mut seen: HashMap<u64, TemplateType> = HashMap::new();
        for e in book.exercises {
            if let Some(prev) = seen.insert(e.id, e.template_type) {
                if prev != e.template_type {
                    return Err(StoreError::ConflictingExercise(e.id));
                }
            }
            store.add_exercise(e.id, e.template_type)?;
        }
        for l in book.logs {
            store.append_log(l)?;
        }
        Ok(store)
    }
}

impl LogStore for MemoryLogStore {
    fn fetch_recent_logs(
        &self,
        exercise_id: u64,
        limit: usize,
    ) -> Result<Vec<MeasurementTuple>, StoreError> {
        let inner = self.lock()?;
        if !inner.exercises.contains_key(&exercise_id) {
            return Err(StoreError::ExerciseNotFound(exercise_id));
        }
        Ok(inner
            .logs
            .get(&exercise_id)
            .map(|l| l.iter().take(limit).map(|r| r.metrics).collect())
            .unwrap_or_default())
    }

    fn fetch_exercise_template_type(&self, exercise_id: u64) -> Result<TemplateType, StoreError> {
        self.lock()?
            .exercises
            .get(&exercise_id)
            .copied()
            .ok_or(StoreError::ExerciseNotFound(exercise_id))
    }
}
