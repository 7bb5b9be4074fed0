use thiserror::Error;

// -----------------------------------------------------------------------------
// ConfigError

/// Failure while declaring configuration.
///
/// Raised by [`Configurator::configure`](crate::Configurator::configure) and
/// the [`TypeConfigurator`](crate::TypeConfigurator) methods. A failing batch
/// leaves the configurator as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("type `{ty}` has already been configured")]
    AlreadyConfigured { ty: &'static str },
    #[error("type `{ty}` is not registered")]
    UnregisteredType { ty: &'static str },
    #[error("the selector does not access a member")]
    NotMemberAccess,
    #[error("member `{member}` is not accessed directly on the configured instance")]
    ParameterNotMemberOwner { member: String },
    #[error("unable to resolve member `{member}` on `{ty}`")]
    UnresolvedMember { ty: &'static str, member: String },
    #[error("member `{member}` is declared on `{declaring}`, not on the configured type `{reflected}`")]
    ReflectedTypeNotMemberOwner {
        reflected: &'static str,
        declaring: &'static str,
        member: String,
    },
    #[error("member `{member}` of `{ty}` is already configured")]
    PropertyAlreadyConfigured { ty: &'static str, member: String },
    #[error("`{ty}` cannot name two members `{name}`: already used by `{existing}`")]
    PropertyNameConflict {
        ty: &'static str,
        name: String,
        existing: String,
    },
    #[error("`{ty}` cannot use name `{name}`: already used by `{existing_type}.{existing_member}`")]
    InheritancePropertyNameConflict {
        ty: &'static str,
        name: String,
        existing_type: &'static str,
        existing_member: String,
    },
    #[error("type `{ty}` already has contract name `{existing}`")]
    DuplicateTypeAlias { ty: &'static str, existing: String },
    #[error("contract name `{name}` is already bound to `{ty}`")]
    DuplicateAliasName { name: String, ty: &'static str },
    #[error("factory for `{ty}` takes {expected} parameters, {actual} names were given")]
    ParameterCountMismatch {
        ty: &'static str,
        expected: usize,
        actual: usize,
    },
}

// -----------------------------------------------------------------------------
// ResolveError

/// Failure while assembling a contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResolveError {
    #[error("type `{ty}` is not registered")]
    UnregisteredType { ty: &'static str },
    #[error("`{ty}` has two members serialized as `{name}`: `{existing}` and `{member}`")]
    DuplicateMemberName {
        ty: &'static str,
        name: String,
        existing: String,
        member: String,
    },
}

// -----------------------------------------------------------------------------
// CreateError

/// Failure while running a construction override.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CreateError {
    #[error("parameter `{param}` does not accept null")]
    ArgumentNull { param: String },
    #[error("parameter `{param}` expects a `{expected}` value")]
    ArgumentType {
        param: String,
        expected: &'static str,
    },
    #[error("expected at least {expected} arguments, got {actual}")]
    ArgumentCount { expected: usize, actual: usize },
    #[error("{0}")]
    Custom(String),
}

impl CreateError {
    /// A failure raised by a user factory.
    #[inline]
    pub fn custom(message: impl core::fmt::Display) -> Self {
        Self::Custom(message.to_string())
    }
}

// -----------------------------------------------------------------------------
// BindError

/// Failure while mapping a name back to a type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BindError {
    #[error("no type is bound to `{name}`")]
    UnknownTypeName { name: String },
    #[error("type `{name}` does not belong to `{qualifier}`")]
    QualifierMismatch { name: String, qualifier: String },
}
