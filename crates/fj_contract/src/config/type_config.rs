use alloc::sync::Arc;
use core::marker::PhantomData;

use fj_reflect::access::Factory;
use fj_reflect::info::{MemberId, Type, TypeInfo, TypePath};
use fj_reflect::registry::TypeRegistry;

use crate::select::{MemberPath, resolve_member};
use crate::{ConfigError, Configurator, CreateError, CreatorArgs, IntoOverrideCreator, OverrideCreator};
use crate::{PropertyConfig, SerializeCondition};

// -----------------------------------------------------------------------------
// Batch

/// Declarations staged by one [`Configurator::configure`] call.
pub(super) struct Batch {
    pub(super) ty: Type,
    pub(super) properties: Vec<(MemberId, PropertyConfig)>,
    pub(super) ignored: Vec<MemberId>,
    pub(super) alias: Option<Arc<str>>,
    pub(super) default_creator: Option<Factory>,
    pub(super) override_creator: Option<OverrideCreator>,
}

/// Whether `iface_member` is an interface member implemented by `member`.
fn is_implemented_by(registry: &TypeRegistry, iface_member: &MemberId, member: &MemberId) -> bool {
    registry
        .get(&iface_member.declaring().id())
        .is_some_and(TypeInfo::is_interface)
        && registry.implementation_of(member.declaring(), iface_member).as_ref() == Some(member)
}

/// Whether two members are one logical member seen from different types.
fn is_same_member(registry: &TypeRegistry, a: &MemberId, b: &MemberId) -> bool {
    registry.is_same_slot(a, b) || is_implemented_by(registry, a, b) || is_implemented_by(registry, b, a)
}

// -----------------------------------------------------------------------------
// TypeConfigurator

/// Declares the serialization settings of `T`.
///
/// Obtained inside [`Configurator::configure`]. Members are chosen with
/// selector closures such as `|m| m.get("Age")`, and must be declared on `T`
/// itself; inherited members are configured on their declaring type.
pub struct TypeConfigurator<'c, T: ?Sized> {
    owner: &'c Configurator,
    batch: Batch,
    _marker: PhantomData<fn() -> *const T>,
}

impl<'c, T: TypePath + ?Sized> TypeConfigurator<'c, T> {
    pub(super) fn new(owner: &'c Configurator, ty: Type) -> Self {
        Self {
            owner,
            batch: Batch {
                ty,
                properties: Vec::new(),
                ignored: Vec::new(),
                alias: None,
                default_creator: None,
                override_creator: None,
            },
            _marker: PhantomData,
        }
    }

    #[inline]
    pub(super) fn into_batch(self) -> Batch {
        self.batch
    }

    /// Configures a member that must be present and not `null`.
    pub fn has_required_property(
        &mut self,
        selector: impl FnOnce(MemberPath) -> MemberPath,
        configure: impl FnOnce(PropertyConfigurator<T>) -> PropertyConfigurator<T>,
    ) -> Result<&mut Self, ConfigError> {
        self.add_property(selector, true, configure)
    }

    /// Configures a member that may be missing.
    pub fn has_optional_property(
        &mut self,
        selector: impl FnOnce(MemberPath) -> MemberPath,
        configure: impl FnOnce(PropertyConfigurator<T>) -> PropertyConfigurator<T>,
    ) -> Result<&mut Self, ConfigError> {
        self.add_property(selector, false, configure)
    }

    /// Never serializes a member. Ignoring a member twice is allowed.
    pub fn ignore_property(
        &mut self,
        selector: impl FnOnce(MemberPath) -> MemberPath,
    ) -> Result<&mut Self, ConfigError> {
        let member = resolve_member(&self.owner.registry, &self.batch.ty, selector)?;
        if !self.batch.ignored.contains(&member) {
            self.batch.ignored.push(member);
        }
        Ok(self)
    }

    /// Names `T` in polymorphic documents.
    pub fn has_contract_name(&mut self, name: &str) -> Result<&mut Self, ConfigError> {
        if let Some(existing) = &self.batch.alias {
            return Err(ConfigError::DuplicateTypeAlias {
                ty: self.batch.ty.path(),
                existing: existing.to_string(),
            });
        }
        if let Some(ty) = self.owner.name_to_type.get(name) {
            return Err(ConfigError::DuplicateAliasName {
                name: name.into(),
                ty: ty.path(),
            });
        }
        self.batch.alias = Some(Arc::from(name));
        Ok(self)
    }

    fn add_property(
        &mut self,
        selector: impl FnOnce(MemberPath) -> MemberPath,
        is_required: bool,
        configure: impl FnOnce(PropertyConfigurator<T>) -> PropertyConfigurator<T>,
    ) -> Result<&mut Self, ConfigError> {
        let member = resolve_member(&self.owner.registry, &self.batch.ty, selector)?;
        let config = configure(PropertyConfigurator::new()).into_config(&member, is_required);
        self.check_conflicts(&member, &config.name)?;
        self.batch.properties.push((member, config));
        Ok(self)
    }

    fn check_conflicts(&self, member: &MemberId, name: &str) -> Result<(), ConfigError> {
        let ty = &self.batch.ty;
        let registry = &*self.owner.registry;

        if self.batch.properties.iter().any(|(id, _)| id == member) {
            return Err(ConfigError::PropertyAlreadyConfigured {
                ty: ty.path(),
                member: member.name().into(),
            });
        }

        if let Some((existing, _)) = self.batch.properties.iter().find(|(_, c)| &*c.name == name) {
            return Err(ConfigError::PropertyNameConflict {
                ty: ty.path(),
                name: name.into(),
                existing: existing.name().into(),
            });
        }

        for (other, entries) in &self.owner.store.properties {
            if other == ty || !registry.are_related(other, ty) {
                continue;
            }
            let clash = entries
                .iter()
                .find(|(id, c)| &*c.name == name && !is_same_member(registry, id, member));
            if let Some((existing, _)) = clash {
                return Err(ConfigError::InheritancePropertyNameConflict {
                    ty: ty.path(),
                    name: name.into(),
                    existing_type: other.path(),
                    existing_member: existing.name().into(),
                });
            }
        }

        Ok(())
    }
}

impl<'c, T: TypePath> TypeConfigurator<'c, T> {
    /// Creates instances of `T` with `f` instead of the registered default.
    ///
    /// A later call replaces the factory.
    pub fn construct_with(&mut self, f: impl Fn() -> T + Send + Sync + 'static) -> &mut Self {
        self.batch.default_creator = Some(Factory::new(f));
        self
    }

    /// Creates instances of `T` from positional arguments matched with the
    /// constructor parameters registered on `T`.
    ///
    /// A later call replaces the factory.
    pub fn construct_with_args(
        &mut self,
        f: impl Fn(CreatorArgs) -> Result<T, CreateError> + Send + Sync + 'static,
    ) -> &mut Self {
        self.batch.override_creator = Some(OverrideCreator::raw(f));
        self
    }

    /// Creates instances of `T` by calling `f` with document values.
    ///
    /// The parameter types come from `f`; `names` holds the document name of
    /// each parameter, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use fj_contract::{Configurator, ContractResolver};
    /// use fj_reflect::info::{Type, TypeInfo, TypePath, Typed};
    /// use fj_reflect::registry::TypeRegistry;
    ///
    /// struct Dog { age: i32 }
    /// impl TypePath for Dog {}
    /// impl Typed for Dog {
    ///     fn type_info() -> TypeInfo {
    ///         TypeInfo::class::<Self>().build()
    ///     }
    /// }
    ///
    /// let mut registry = TypeRegistry::new();
    /// registry.register::<Dog>();
    ///
    /// let mut configurator = Configurator::new(registry);
    /// configurator.configure::<Dog>(|t| {
    ///     t.construct_with_params(&["b", "age", "f"], |_b: i32, age: i32, _f: i32| Dog { age })?;
    ///     Ok(())
    /// })?;
    ///
    /// let contract = configurator.complete().resolve_contract(&Type::of::<Dog>())?;
    /// let names: Vec<_> = contract.creator_parameters().iter().map(|p| p.name()).collect();
    /// assert_eq!(names, ["b", "age", "f"]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn construct_with_params<Args, F>(&mut self, names: &[&str], f: F) -> Result<&mut Self, ConfigError>
    where
        F: IntoOverrideCreator<T, Args>,
    {
        if names.len() != F::ARITY {
            return Err(ConfigError::ParameterCountMismatch {
                ty: self.batch.ty.path(),
                expected: F::ARITY,
                actual: names.len(),
            });
        }
        self.batch.override_creator = Some(OverrideCreator::typed(names, f));
        Ok(self)
    }
}

// -----------------------------------------------------------------------------
// PropertyConfigurator

/// Settings of one configured member of `T`.
pub struct PropertyConfigurator<T: ?Sized> {
    name: Option<Arc<str>>,
    condition: Option<SerializeCondition>,
    _marker: PhantomData<fn() -> *const T>,
}

impl<T: TypePath + ?Sized> PropertyConfigurator<T> {
    fn new() -> Self {
        Self {
            name: None,
            condition: None,
            _marker: PhantomData,
        }
    }

    fn into_config(self, member: &MemberId, is_required: bool) -> PropertyConfig {
        PropertyConfig {
            name: self.name.unwrap_or_else(|| member.name_arc().clone()),
            is_required,
            condition: self.condition,
        }
    }

    /// Sets the serialized name; the member name is used otherwise.
    pub fn has_name(mut self, name: &str) -> Self {
        self.name = Some(Arc::from(name));
        self
    }
}

impl<T: TypePath> PropertyConfigurator<T> {
    /// Writes the member only for instances accepted by `f`.
    pub fn has_serialize_condition(mut self, f: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.condition = Some(SerializeCondition::new(f));
        self
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    fn configurator() -> Configurator {
        Configurator::new(registry())
    }

    #[test]
    fn duplicate_member() {
        let err = configurator()
            .configure::<A>(|t| {
                t.has_optional_property(|m| m.get("Property1"), |p| p.has_name("propA1"))?
                    .has_optional_property(|m| m.get("Property1"), |p| p.has_name("propA2"))?;
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::PropertyAlreadyConfigured { member, .. } if member == "Property1"));
    }

    #[test]
    fn duplicate_name_in_type() {
        let err = configurator()
            .configure::<A>(|t| {
                t.has_optional_property(|m| m.get("Property1"), |p| p.has_name("propA"))?
                    .has_optional_property(|m| m.get("Property2"), |p| p.has_name("propA"))?;
                Ok(())
            })
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::PropertyNameConflict {
                ty: Type::of::<A>().path(),
                name: "propA".into(),
                existing: "Property1".into(),
            }
        );
    }

    #[test]
    fn ignore_is_idempotent() {
        let mut configurator = configurator();
        configurator
            .configure::<A>(|t| {
                t.ignore_property(|m| m.get("Property1"))?
                    .ignore_property(|m| m.get("Property1"))?;
                Ok(())
            })
            .unwrap();
        assert!(configurator.is_configured(&Type::of::<A>()));
    }

    #[test]
    fn inherited_member_is_rejected() {
        let err = configurator()
            .configure::<B>(|t| {
                t.has_optional_property(|m| m.get("Property1"), |p| p.has_name("propA"))?;
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::ReflectedTypeNotMemberOwner { .. }));
    }

    #[test]
    fn unrelated_types_share_names() {
        let mut configurator = configurator();
        configurator
            .configure::<A>(|t| {
                t.has_optional_property(|m| m.get("Property1"), |p| p.has_name("propA"))?;
                Ok(())
            })
            .unwrap()
            .configure::<C>(|t| {
                t.has_optional_property(|m| m.get("Property1"), |p| p.has_name("propA"))?;
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn related_types_conflict_both_ways() {
        let mut base_first = configurator();
        base_first
            .configure::<A>(|t| {
                t.has_optional_property(|m| m.get("Property1"), |p| p.has_name("propA"))?;
                Ok(())
            })
            .unwrap();
        let err = base_first
            .configure::<B>(|t| {
                t.has_optional_property(|m| m.get("Property4"), |p| p.has_name("propA"))?;
                Ok(())
            })
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InheritancePropertyNameConflict {
                ty: Type::of::<B>().path(),
                name: "propA".into(),
                existing_type: Type::of::<A>().path(),
                existing_member: "Property1".into(),
            }
        );

        let mut derived_first = configurator();
        derived_first
            .configure::<B>(|t| {
                t.has_optional_property(|m| m.get("Property4"), |p| p.has_name("propA"))?;
                Ok(())
            })
            .unwrap();
        let err = derived_first
            .configure::<A>(|t| {
                t.has_optional_property(|m| m.get("Property1"), |p| p.has_name("propA"))?;
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::InheritancePropertyNameConflict { .. }));
    }

    #[test]
    fn interface_and_class_conflict() {
        let mut configurator = configurator();
        configurator
            .configure::<dyn TestObject>(|t| {
                t.has_optional_property(|m| m.get("Property1"), |p| p.has_name("shared"))?;
                Ok(())
            })
            .unwrap();
        let err = configurator
            .configure::<A>(|t| {
                t.has_optional_property(|m| m.get("Property3"), |p| p.has_name("shared"))?;
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::InheritancePropertyNameConflict { .. }));
    }

    #[test]
    fn same_logical_member_may_repeat_a_name() {
        let mut configurator = configurator();
        configurator
            .configure::<A>(|t| {
                t.has_optional_property(|m| m.get("Property1"), |p| p.has_name("propA"))?;
                Ok(())
            })
            .unwrap()
            .configure::<A2>(|t| {
                t.has_optional_property(|m| m.get("Property1"), |p| p.has_name("propA"))?;
                Ok(())
            })
            .unwrap()
            .configure::<dyn TestObject>(|t| {
                t.has_optional_property(|m| m.get("Property1"), |p| p.has_name("propA"))?;
                Ok(())
            })
            .unwrap();

        let err = configurator
            .configure::<A3>(|t| {
                t.has_optional_property(|m| m.get("Property1"), |p| p.has_name("propA"))?;
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::InheritancePropertyNameConflict { .. }));
    }

    #[test]
    fn selector_errors() {
        let mut configurator = configurator();
        let err = configurator
            .configure::<A>(|t| {
                t.ignore_property(|m| m)?;
                Ok(())
            })
            .unwrap_err();
        assert_eq!(err, ConfigError::NotMemberAccess);

        let err = configurator
            .configure::<A>(|t| {
                t.ignore_property(|m| m.get("Missing"))?;
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnresolvedMember { .. }));
    }

    #[test]
    fn contract_names() {
        let mut configurator = configurator();
        let err = configurator
            .configure::<A>(|t| {
                t.has_contract_name("a")?.has_contract_name("a2")?;
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateTypeAlias { existing, .. } if existing == "a"));

        configurator
            .configure::<A>(|t| {
                t.has_contract_name("a")?;
                Ok(())
            })
            .unwrap();
        let err = configurator
            .configure::<B>(|t| {
                t.has_contract_name("a")?;
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateAliasName { name, .. } if name == "a"));
    }

    #[test]
    fn factory_arity_is_checked() {
        let err = configurator()
            .configure::<Z>(|t| {
                t.construct_with_params(&["a", "b"], |value: i32| Z { value })?;
                Ok(())
            })
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::ParameterCountMismatch {
                ty: Type::of::<Z>().path(),
                expected: 1,
                actual: 2,
            }
        );
    }

    #[test]
    fn last_factory_wins() {
        let mut configurator = configurator();
        configurator
            .configure::<Z>(|t| {
                t.construct_with(|| Z { value: 1 })
                    .construct_with(|| Z { value: 2 })
                    .construct_with_args(|mut args| Ok(Z { value: args.take(0)? }))
                    .construct_with_params(&["v"], |value: i32| Z { value: value * 10 })?;
                Ok(())
            })
            .unwrap();

        let configuration = configurator.complete();
        let contract = crate::ContractResolver::resolve_contract(&configuration, &Type::of::<Z>()).unwrap();
        let created = contract.create_default().unwrap();
        assert_eq!(created.downcast_ref::<Z>().map(|z| z.value), Some(2));

        let creator = contract.override_creator().unwrap();
        let args = CreatorArgs::new(contract.creator_parameters().clone(), vec![Some(Box::new(4_i32) as Box<dyn core::any::Any>)]).unwrap();
        let created = creator.invoke(args).unwrap();
        assert_eq!(created.downcast_ref::<Z>().map(|z| z.value), Some(40));
    }
}
