/// Error types for TabFlow operations
///
/// Malformed URLs are not errors: the domain classifier returns `None` and
/// the tab is left out of automatic grouping.

#[derive(Debug, thiserror::Error)]
pub enum TabFlowError {
    #[error("Storage unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Stored {key} record is malformed: {details}")]
    CorruptRecord { key: String, details: String },

    #[error("Tab service unavailable: {0}")]
    InspectionUnavailable(String),

    #[error("Extension shell unavailable: {0}")]
    ShellUnavailable(String),

    #[error("Tab not found: {0}")]
    TabNotFound(i32),
}

pub type Result<T> = std::result::Result<T, TabFlowError>;
