use alloc::sync::Arc;
use core::any::Any;
use core::fmt;

use fj_reflect::access::Factory;
use fj_reflect::info::{MemberId, Type, TypePath};
use fj_utils::hash::HashMap;

use crate::creator::OverrideCreator;

// -----------------------------------------------------------------------------
// PropertyConfig

/// Serialization settings attached to one member.
#[derive(Clone)]
pub struct PropertyConfig {
    pub(crate) name: Arc<str>,
    pub(crate) is_required: bool,
    pub(crate) condition: Option<SerializeCondition>,
}

impl PropertyConfig {
    /// The serialized name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_required(&self) -> bool {
        self.is_required
    }

    #[inline]
    pub fn serialize_condition(&self) -> Option<&SerializeCondition> {
        self.condition.as_ref()
    }
}

impl fmt::Debug for PropertyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyConfig")
            .field("name", &self.name)
            .field("is_required", &self.is_required)
            .field("has_condition", &self.condition.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// SerializeCondition

/// A predicate deciding, per instance, whether a member is written.
///
/// The predicate runs against the part of the instance of type
/// [`owner`](SerializeCondition::owner).
#[derive(Clone)]
pub struct SerializeCondition {
    owner: Type,
    predicate: Arc<dyn Fn(&dyn Any) -> bool + Send + Sync>,
}

impl SerializeCondition {
    pub(crate) fn new<T: TypePath>(f: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            owner: Type::of::<T>(),
            predicate: Arc::new(move |value: &dyn Any| value.downcast_ref::<T>().is_some_and(&f)),
        }
    }

    /// The type the predicate inspects.
    #[inline]
    pub fn owner(&self) -> &Type {
        &self.owner
    }

    /// Evaluates the predicate; `false` when `value` is not an `owner`.
    #[inline]
    pub fn evaluate(&self, value: &dyn Any) -> bool {
        (self.predicate)(value)
    }
}

impl fmt::Debug for SerializeCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SerializeCondition").field(&self.owner).finish()
    }
}

// -----------------------------------------------------------------------------
// ConfigStore

/// Per-type entries keyed by member, in declaration order.
pub(crate) type TypeTable<E> = HashMap<Type, Vec<(MemberId, E)>>;

/// Everything declared on a configurator, sealed at completion.
#[derive(Default)]
pub(crate) struct ConfigStore {
    pub(crate) properties: TypeTable<PropertyConfig>,
    pub(crate) ignored: TypeTable<()>,
    pub(crate) default_creators: HashMap<Type, Factory>,
    pub(crate) override_creators: HashMap<Type, OverrideCreator>,
    pub(crate) allow_null_values: bool,
}

impl ConfigStore {
    pub(crate) fn new() -> Self {
        Self {
            allow_null_values: true,
            ..Self::default()
        }
    }
}
