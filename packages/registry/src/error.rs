//! Error types for the registry

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Component type \"{0}\" is already registered")]
    DuplicateType(String),

    #[error("Component type id must not be empty")]
    EmptyType,

    #[error("Invalid pattern for {type_id}.{prop}: {source}")]
    InvalidPattern {
        type_id: String,
        prop: String,
        #[source]
        source: regex::Error,
    },

    #[error("{type_id}.{prop} is a select property without options")]
    MissingOptions { type_id: String, prop: String },

    #[error("{type_id}.{prop} depends on unknown property \"{depends_on}\"")]
    UnknownConditional {
        type_id: String,
        prop: String,
        depends_on: String,
    },
}
