use crate::catalog::ContentId;
use thiserror::Error;

/// Failures of the authored-timeline adapter.
#[derive(Debug, Error)]
pub enum TimelineError {
    /// The serialized snapshot could not be decoded. Fatal; never retried.
    #[error("malformed timeline snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("timeline snapshot has no sheet named '{0}'")]
    MissingSheet(String),

    #[error("invalid play range [{from}, {to}]")]
    InvalidRange { from: f64, to: f64 },

    #[error("invalid playback rate {0}")]
    InvalidRate(f64),

    /// `play` was called before the project finished setting up.
    #[error("sequence started before the project was ready")]
    NotReady,

    /// The ready trigger was dropped without firing.
    #[error("project setup was abandoned before it became ready")]
    SetupAbandoned,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("content item {0} is not in the catalog")]
    UnknownItem(ContentId),

    #[error("catalog must contain at least one item")]
    EmptyCatalog,

    #[error("content item {0} appears twice in the catalog")]
    DuplicateItem(ContentId),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value for {field}: {value}")]
    Invalid { field: &'static str, value: f32 },
}
