use thiserror::Error;

/// Feil fra konfigurasjon og JSON-inngangen. Selve klassifiseringen feiler aldri.
#[derive(Debug, Error)]
pub enum TrendError {
    #[error("unknown template type: {0}")]
    UnknownTemplate(String),

    #[error("invalid trend config: {0}")]
    InvalidConfig(String),

    #[error("parse error ({context}) at {path}: {message}")]
    Parse {
        context: &'static str,
        path: String,
        message: String,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Feil fra lagringslaget (den eksterne samarbeidspartneren).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("exercise {0} not found")]
    ExerciseNotFound(u64),

    #[error("template type of exercise {0} is frozen once logs exist")]
    TemplateFrozen(u64),

    #[error("exercise {0} listed twice with different template types")]
    ConflictingExercise(u64),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
