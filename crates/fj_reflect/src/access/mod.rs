//! Type-erased member accessors and factories.
//!
//! - [`Getter`]: reads a member of an owner and hands back an
//!   [`erased_serde::Serialize`] value.
//! - [`Setter`]: deserializes a value from an [`erased_serde::Deserializer`]
//!   and writes it into an owner.
//! - [`Factory`]: creates a fresh boxed instance.
//!
//! Accessors are bound to the *declaring* type of their member. Use
//! [`TypeRegistry::get_value`](crate::registry::TypeRegistry::get_value)
//! to run them against a derived instance.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::any::{Any, TypeId};
use core::fmt;

use serde_core::Serialize;
use serde_core::de::DeserializeOwned;
use thiserror::Error;

// -----------------------------------------------------------------------------
// AccessError

/// Failure while reading or writing a member through the registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccessError {
    #[error("expected an instance of `{expected}`")]
    OwnerMismatch { expected: &'static str },
    #[error("runtime type {0:?} is not registered")]
    UnregisteredType(TypeId),
    #[error("member `{member}` is not registered")]
    UnknownMember { member: String },
    #[error("member `{member}` cannot be read")]
    NotReadable { member: String },
    #[error("member `{member}` cannot be written")]
    NotWritable { member: String },
    #[error("`{concrete}` does not implement `{member}`")]
    MissingImplementation {
        concrete: &'static str,
        member: String,
    },
    #[error("invalid `{expected}` value: {message}")]
    Value {
        expected: &'static str,
        message: String,
    },
}

// -----------------------------------------------------------------------------
// Getter

type GetFn = dyn Fn(&dyn Any) -> Result<Box<dyn erased_serde::Serialize>, AccessError> + Send + Sync;

/// Reads a member from its declaring type.
#[derive(Clone)]
pub struct Getter(Arc<GetFn>);

impl Getter {
    /// Wraps a typed read function.
    pub fn new<O, V>(f: impl Fn(&O) -> V + Send + Sync + 'static) -> Self
    where
        O: Any,
        V: Serialize + 'static,
    {
        Self(Arc::new(move |owner: &dyn Any| {
            let owner = owner
                .downcast_ref::<O>()
                .ok_or(AccessError::OwnerMismatch {
                    expected: core::any::type_name::<O>(),
                })?;
            Ok(Box::new(f(owner)) as Box<dyn erased_serde::Serialize>)
        }))
    }

    /// Reads the value out of `owner`, which must be the declaring type.
    #[inline]
    pub fn get(&self, owner: &dyn Any) -> Result<Box<dyn erased_serde::Serialize>, AccessError> {
        (self.0)(owner)
    }
}

impl fmt::Debug for Getter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Getter")
    }
}

// -----------------------------------------------------------------------------
// Setter

type SetFn = dyn for<'de> Fn(&mut dyn Any, &mut dyn erased_serde::Deserializer<'de>) -> Result<(), AccessError>
    + Send
    + Sync;

fn erase_setter<F>(f: F) -> Arc<SetFn>
where
    F: for<'de> Fn(&mut dyn Any, &mut dyn erased_serde::Deserializer<'de>) -> Result<(), AccessError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// Writes a member of its declaring type.
#[derive(Clone)]
pub struct Setter(Arc<SetFn>);

impl Setter {
    /// Wraps a typed write function.
    pub fn new<O, V>(f: impl Fn(&mut O, V) + Send + Sync + 'static) -> Self
    where
        O: Any,
        V: DeserializeOwned + 'static,
    {
        Self(erase_setter(move |owner, deserializer| {
            let owner = owner
                .downcast_mut::<O>()
                .ok_or(AccessError::OwnerMismatch {
                    expected: core::any::type_name::<O>(),
                })?;
            let value: V = erased_serde::deserialize(deserializer).map_err(|e| AccessError::Value {
                expected: core::any::type_name::<V>(),
                message: e.to_string(),
            })?;
            f(owner, value);
            Ok(())
        }))
    }

    /// Deserializes a value and writes it into `owner`.
    #[inline]
    pub fn set(
        &self,
        owner: &mut dyn Any,
        deserializer: &mut dyn erased_serde::Deserializer<'_>,
    ) -> Result<(), AccessError> {
        (self.0)(owner, deserializer)
    }
}

impl fmt::Debug for Setter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Setter")
    }
}

// -----------------------------------------------------------------------------
// Factory

/// Creates a fresh boxed instance of one type.
#[derive(Clone)]
pub struct Factory {
    produces: &'static str,
    func: Arc<dyn Fn() -> Box<dyn Any> + Send + Sync>,
}

impl Factory {
    /// Wraps a typed zero-argument constructor.
    pub fn new<T: Any>(f: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            produces: core::any::type_name::<T>(),
            func: Arc::new(move || Box::new(f()) as Box<dyn Any>),
        }
    }

    /// Invokes the constructor.
    #[inline]
    pub fn create(&self) -> Box<dyn Any> {
        (self.func)()
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Factory").field(&self.produces).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
