use fj_contract::{BindError, CreateError, ResolveError};
use fj_reflect::access::AccessError;

// -----------------------------------------------------------------------------
// Error

/// Failure while reading or writing a JSON document.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Bind(#[from] BindError),
    #[error(transparent)]
    Create(#[from] CreateError),
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("property `{name}` of `{ty}`: {source}")]
    Property {
        ty: &'static str,
        name: String,
        #[source]
        source: AccessError,
    },
    #[error("argument `{param}` of `{ty}`: {message}")]
    Argument {
        ty: &'static str,
        param: String,
        message: String,
    },
    #[error("expected a JSON object for `{ty}`")]
    ExpectedObject { ty: &'static str },
    #[error("expected a JSON array of `{ty}`")]
    ExpectedArray { ty: &'static str },
    #[error("the type name must be a string, found `{found}`")]
    InvalidTypeName { found: String },
    #[error("`{actual}` is not assignable to `{expected}`")]
    IncompatibleType {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("required property `{name}` of `{ty}` is missing")]
    MissingRequired { ty: &'static str, name: String },
    #[error("property `{name}` of `{ty}` does not accept null")]
    NullNotAllowed { ty: &'static str, name: String },
    #[error("`{ty}` has no creator")]
    NoCreator { ty: &'static str },
    #[error("the created instance is not a `{expected}`")]
    TypeMismatch { expected: &'static str },
}
