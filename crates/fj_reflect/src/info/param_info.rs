use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::{Any, TypeId};
use core::fmt;

use serde_core::de::DeserializeOwned;

type DeserializeFn =
    for<'de> fn(&mut dyn erased_serde::Deserializer<'de>) -> Result<Box<dyn Any>, erased_serde::Error>;

fn deserialize_boxed<P: DeserializeOwned + 'static>(
    deserializer: &mut dyn erased_serde::Deserializer<'_>,
) -> Result<Box<dyn Any>, erased_serde::Error> {
    let value: P = erased_serde::deserialize(deserializer)?;
    Ok(Box::new(value))
}

/// A named, typed constructor parameter.
///
/// Values are deserialized into a `Box<dyn Any>` holding exactly `P`.
///
/// # Examples
///
/// ```
/// use fj_reflect::info::ParamInfo;
///
/// let param = ParamInfo::of::<i32>("age");
/// let mut de = <dyn erased_serde::Deserializer>::erase(serde_json::json!(12));
/// let value = param.deserialize(&mut de).unwrap();
/// assert_eq!(value.downcast_ref::<i32>(), Some(&12));
/// assert_eq!(param.name(), "age");
/// ```
#[derive(Clone)]
pub struct ParamInfo {
    name: Arc<str>,
    type_id: TypeId,
    type_name: &'static str,
    deserialize: DeserializeFn,
}

impl ParamInfo {
    /// Describes a parameter named `name` of type `P`.
    pub fn of<P: DeserializeOwned + 'static>(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            type_id: TypeId::of::<P>(),
            type_name: core::any::type_name::<P>(),
            deserialize: deserialize_boxed::<P>,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Deserializes one argument value.
    #[inline]
    pub fn deserialize(
        &self,
        deserializer: &mut dyn erased_serde::Deserializer<'_>,
    ) -> Result<Box<dyn Any>, erased_serde::Error> {
        (self.deserialize)(deserializer)
    }
}

impl fmt::Debug for ParamInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.type_name)
    }
}
