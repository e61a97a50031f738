use std::path::Path;

use log::{info, warn};

use crate::engine::{Logbook, MemoryLogStore};
use crate::error::TrendError;
use crate::trend::TrendConfig;

/// Leser trend-konfig fra disk (JSON).
/// Hvis filen ikke finnes, returneres standardverdiene.
pub fn load_config(path: impl AsRef<Path>) -> Result<TrendConfig, TrendError> {
    let path = path.as_ref();
    if !path.exists() {
        warn!("fant ikke trend-konfig på {}, bruker standard", path.display());
        return Ok(TrendConfig::default());
    }
    let contents = std::fs::read_to_string(path)?;
    let cfg: TrendConfig = serde_json::from_str(&contents)?;
    cfg.validate()?;
    info!(
        "trend-konfig lastet fra {} (window={}, min_sessions={})",
        path.display(),
        cfg.window,
        cfg.min_sessions
    );
    Ok(cfg)
}

/// Lagrer konfig som JSON (pretty-print).
pub fn save_config(cfg: &TrendConfig, path: impl AsRef<Path>) -> Result<(), TrendError> {
    cfg.validate()?;
    let json = serde_json::to_string_pretty(cfg)?;
    std::fs::write(path.as_ref(), json)?;
    info!("trend-konfig lagret til {}", path.as_ref().display());
    Ok(())
}

/// Leser et logbok-øyeblikksbilde inn i en ny `MemoryLogStore`.
pub fn load_logbook(path: impl AsRef<Path>) -> Result<MemoryLogStore, TrendError> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    let book: Logbook = serde_json::from_str(&contents)?;
    let n = book.logs.len();
    let store = MemoryLogStore::from_logbook(book)?;
    info!("logbok lastet fra {} ({} logger)", path.as_ref().display(), n);
    Ok(store)
}

pub fn save_logbook(store: &MemoryLogStore, path: impl AsRef<Path>) -> Result<(), TrendError> {
    let book = store.snapshot()?;
    std::fs::write(path.as_ref(), serde_json::to_string_pretty(&book)?)?;
    info!("logbok lagret til {} ({} logger)", path.as_ref().display(), book.logs.len());
    Ok(())
}
