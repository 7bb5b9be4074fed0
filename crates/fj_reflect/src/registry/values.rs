use alloc::boxed::Box;
use alloc::string::ToString;
use core::any::Any;

use crate::access::AccessError;
use crate::info::{MemberId, MemberInfo, Type};
use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// Instance access

impl TypeRegistry {
    /// Returns the registered [`Type`] of a value's runtime type.
    pub fn type_of(&self, value: &dyn Any) -> Result<Type, AccessError> {
        let id = Any::type_id(value);
        self.get(&id)
            .map(|info| *info.ty())
            .ok_or(AccessError::UnregisteredType(id))
    }

    /// Projects `value` onto its part of type `to`, following base links.
    ///
    /// Returns `None` if `to` is not `value`'s type or one of its bases.
    pub fn upcast_ref<'a>(&self, value: &'a dyn Any, to: &Type) -> Option<&'a dyn Any> {
        let mut current = value;
        loop {
            let id = Any::type_id(current);
            if id == to.id() {
                return Some(current);
            }
            let link = self.get(&id)?.base()?;
            current = link.upcast(current)?;
        }
    }

    /// Mutable version of [`upcast_ref`](Self::upcast_ref).
    pub fn upcast_mut<'a>(&self, value: &'a mut dyn Any, to: &Type) -> Option<&'a mut dyn Any> {
        let mut current = value;
        loop {
            let id = Any::type_id(&*current);
            if id == to.id() {
                return Some(current);
            }
            let link = self.get(&id)?.base()?;
            current = link.upcast_mut(current)?;
        }
    }

    /// Resolves the member whose accessors run for `member` on an instance
    /// of `runtime`.
    ///
    /// Interface members map to their implementation; other members are
    /// used as they are.
    pub fn accessor_member(&self, runtime: &Type, member: &MemberId) -> Result<&MemberInfo, AccessError> {
        let declaring_is_interface = self
            .get(&member.declaring().id())
            .is_some_and(|info| info.is_interface());

        let target = if declaring_is_interface {
            self.implementation_of(runtime, member)
                .ok_or_else(|| AccessError::MissingImplementation {
                    concrete: runtime.path(),
                    member: member.to_string(),
                })?
        } else {
            member.clone()
        };

        self.member(&target).ok_or_else(|| AccessError::UnknownMember {
            member: target.to_string(),
        })
    }

    /// Reads `member` from `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fj_reflect::info::{MemberId, MemberInfo, TypeInfo, TypePath, Typed};
    /// use fj_reflect::registry::TypeRegistry;
    ///
    /// #[derive(Default)]
    /// struct Animal { age: i32 }
    /// #[derive(Default)]
    /// struct Cat { base: Animal }
    ///
    /// impl TypePath for Animal {}
    /// impl TypePath for Cat {}
    /// impl Typed for Animal {
    ///     fn type_info() -> TypeInfo {
    ///         TypeInfo::class::<Self>()
    ///             .member(MemberInfo::property::<Self, i32>("Age").getter(|a| a.age))
    ///             .build()
    ///     }
    /// }
    /// impl Typed for Cat {
    ///     fn type_info() -> TypeInfo {
    ///         TypeInfo::class::<Self>()
    ///             .extends::<Animal>(|c| &c.base, |c| &mut c.base)
    ///             .build()
    ///     }
    /// }
    ///
    /// let mut registry = TypeRegistry::new();
    /// registry.register::<Animal>();
    /// registry.register::<Cat>();
    ///
    /// let cat = Cat { base: Animal { age: 5 } };
    /// let age = registry.get_value(&cat, &MemberId::property::<Animal>("Age")).unwrap();
    /// assert_eq!(serde_json::to_value(&*age).unwrap(), 5);
    /// ```
    pub fn get_value(
        &self,
        value: &dyn Any,
        member: &MemberId,
    ) -> Result<Box<dyn erased_serde::Serialize>, AccessError> {
        let runtime = self.type_of(value)?;
        let target = self.accessor_member(&runtime, member)?;
        let getter = target.getter().ok_or_else(|| AccessError::NotReadable {
            member: target.id().to_string(),
        })?;
        let owner = self
            .upcast_ref(value, target.declaring())
            .ok_or(AccessError::OwnerMismatch {
                expected: target.declaring().path(),
            })?;
        getter.get(owner)
    }

    /// Deserializes a value and writes it to `member` of `value`.
    pub fn set_value(
        &self,
        value: &mut dyn Any,
        member: &MemberId,
        deserializer: &mut dyn erased_serde::Deserializer<'_>,
    ) -> Result<(), AccessError> {
        let runtime = self.type_of(&*value)?;
        let target = self.accessor_member(&runtime, member)?;
        let setter = target.setter().ok_or_else(|| AccessError::NotWritable {
            member: target.id().to_string(),
        })?;
        let owner = self
            .upcast_mut(value, target.declaring())
            .ok_or(AccessError::OwnerMismatch {
                expected: target.declaring().path(),
            })?;
        setter.set(owner, deserializer)
    }
}
