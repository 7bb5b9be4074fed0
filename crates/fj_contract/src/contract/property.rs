use alloc::sync::Arc;
use core::any::Any;
use core::fmt;

use fj_reflect::access::AccessError;
use fj_reflect::info::{MemberId, Type};
use fj_reflect::registry::TypeRegistry;

use crate::{ResolveError, SerializeCondition};

// -----------------------------------------------------------------------------
// Required

/// How strictly a property must appear in a document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Required {
    /// May be missing or `null`.
    #[default]
    Default,
    /// Must be present and not `null`.
    Always,
    /// May be missing, must not be `null`.
    DisallowNull,
}

// -----------------------------------------------------------------------------
// ContractProperty

/// One serialized member of a [`Contract`](crate::Contract).
#[derive(Clone)]
pub struct ContractProperty {
    pub(crate) member: MemberId,
    pub(crate) name: Arc<str>,
    pub(crate) required: Required,
    pub(crate) readable: bool,
    pub(crate) writable: bool,
    pub(crate) condition: Option<SerializeCondition>,
    pub(crate) value_type: &'static str,
    pub(crate) registry: Arc<TypeRegistry>,
}

impl ContractProperty {
    /// The underlying member.
    #[inline]
    pub fn member(&self) -> &MemberId {
        &self.member
    }

    /// The name of the underlying member.
    #[inline]
    pub fn underlying_name(&self) -> &str {
        self.member.name()
    }

    #[inline]
    pub fn declaring_type(&self) -> &Type {
        self.member.declaring()
    }

    /// The serialized name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn required(&self) -> Required {
        self.required
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.readable
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    #[inline]
    pub fn value_type_name(&self) -> &'static str {
        self.value_type
    }

    #[inline]
    pub fn serialize_condition(&self) -> Option<&SerializeCondition> {
        self.condition.as_ref()
    }

    /// Whether the property is written for `instance`.
    ///
    /// Without a condition this is always `true`. A condition declared on a
    /// base class runs against the base part of the instance.
    pub fn should_serialize(&self, instance: &dyn Any) -> bool {
        let Some(condition) = &self.condition else {
            return true;
        };
        match self.registry.upcast_ref(instance, condition.owner()) {
            Some(owner) => condition.evaluate(owner),
            None => condition.evaluate(instance),
        }
    }

    /// Reads the property from `instance`.
    #[inline]
    pub fn get_value(&self, instance: &dyn Any) -> Result<Box<dyn erased_serde::Serialize>, AccessError> {
        self.registry.get_value(instance, &self.member)
    }

    /// Deserializes a value and writes it into `instance`.
    #[inline]
    pub fn set_value(
        &self,
        instance: &mut dyn Any,
        deserializer: &mut dyn erased_serde::Deserializer<'_>,
    ) -> Result<(), AccessError> {
        self.registry.set_value(instance, &self.member, deserializer)
    }
}

impl fmt::Debug for ContractProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractProperty")
            .field("member", &self.member)
            .field("name", &self.name)
            .field("required", &self.required)
            .field("readable", &self.readable)
            .field("writable", &self.writable)
            .field("has_condition", &self.condition.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ContractProperties

/// The ordered properties of a contract, unique by serialized name.
#[derive(Clone, Debug, Default)]
pub struct ContractProperties {
    items: Vec<ContractProperty>,
}

impl ContractProperties {
    /// Adds a property.
    ///
    /// On a name clash the property declared on the more derived type takes
    /// the place of the other one; clashing unrelated members fail.
    pub(crate) fn add(&mut self, property: ContractProperty, registry: &TypeRegistry) -> Result<(), ResolveError> {
        let Some(index) = self.items.iter().position(|p| p.name == property.name) else {
            self.items.push(property);
            return Ok(());
        };

        let existing = self.items[index].declaring_type();
        let incoming = property.declaring_type();

        if existing != incoming && registry.is_assignable_from(existing, incoming) {
            log::trace!("`{}` hides `{}` as `{}`", property.member, self.items[index].member, property.name);
            self.items[index] = property;
            Ok(())
        } else if existing != incoming && registry.is_assignable_from(incoming, existing) {
            log::trace!("`{}` is hidden by `{}`", property.member, self.items[index].member);
            Ok(())
        } else {
            Err(ResolveError::DuplicateMemberName {
                ty: incoming.path(),
                name: property.name.to_string(),
                existing: self.items[index].member.to_string(),
                member: property.member.to_string(),
            })
        }
    }

    /// The property serialized as `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&ContractProperty> {
        self.items.iter().find(|p| &*p.name == name)
    }

    /// The property serialized as `name`, falling back to an ASCII
    /// case-insensitive match.
    pub fn closest_match(&self, name: &str) -> Option<&ContractProperty> {
        self.get(name)
            .or_else(|| self.items.iter().find(|p| p.name.eq_ignore_ascii_case(name)))
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, ContractProperty> {
        self.items.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a ContractProperties {
    type Item = &'a ContractProperty;
    type IntoIter = core::slice::Iter<'a, ContractProperty>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
