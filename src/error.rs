use thiserror::Error;

pub type VizResult<T> = Result<T, VizError>;

#[derive(Debug, Error)]
pub enum VizError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("plugin `{plugin_id}` rejected by strict registry:\n{details}")]
    PluginRejected { plugin_id: String, details: String },

    #[error("{label} validation failed:\n{details}")]
    ValidationFailed { label: String, details: String },

    #[error("availability predicate for mode `{mode_id}` failed: {message}")]
    ModePredicate { mode_id: String, message: String },
}
