pub mod cli;
pub mod engine;
pub mod error;
pub mod json_api;
pub mod storage;
pub mod telemetry;
pub mod template;
pub mod trend;
pub mod types;

#[cfg(feature = "python")]
mod py;

pub use engine::{LogStore, Logbook, MemoryLogStore, TrendEngine};
pub use error::{EngineError, StoreError, TrendError};
pub use storage::{load_config, load_logbook, save_config, save_logbook};
pub use telemetry::Metrics;
pub use template::{reduce, reduce_raw};
pub use trend::{classify, classify_metrics, classify_with, RoundTo, TrendConfig};
pub use types::{
    LogRecord, MeasurementTuple, TemplateType, TrendDirection, TrendState, TrendVerdict,
};
