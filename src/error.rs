use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum GrackdbError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("{resource_type} not found: '{id}'")]
    NotFound { resource_type: String, id: String },

    #[error("unknown resource type: {0}")]
    UnknownResource(String),

    #[error("{resource_type} is missing required field '{field}'")]
    MissingField {
        resource_type: String,
        field: String,
    },
}
