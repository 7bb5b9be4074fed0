use alloc::sync::Arc;
use core::fmt;

use fj_reflect::info::{MemberId, MemberInfo, Type};
use fj_reflect::registry::TypeRegistry;
use fj_utils::hash::HashMap;
use parking_lot::RwLock;

use crate::contract::{Contract, ContractProperties, ContractProperty, ContractResolver, Required};
use crate::lookup::ResolutionWalk;
use crate::store::ConfigStore;
use crate::{OverrideCreator, PropertyConfig, ResolveError};

// -----------------------------------------------------------------------------
// FluentContractResolver

/// Builds contracts from a sealed configuration.
///
/// Contracts are assembled on first request and cached; concurrent first
/// requests for the same type may both assemble it, the first stored one
/// is kept.
pub struct FluentContractResolver {
    registry: Arc<TypeRegistry>,
    store: ConfigStore,
    cache: RwLock<HashMap<Type, Arc<Contract>>>,
}

impl FluentContractResolver {
    pub(crate) fn new(registry: Arc<TypeRegistry>, store: ConfigStore) -> Self {
        Self {
            registry,
            store,
            cache: RwLock::new(HashMap::default()),
        }
    }

    #[inline]
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// Whether optional properties accept `null`.
    #[inline]
    pub fn allows_null_values(&self) -> bool {
        self.store.allow_null_values
    }

    /// The configuration applying to `member`, inherited ones included.
    pub fn property_config(&self, member: &MemberId) -> Option<&PropertyConfig> {
        ResolutionWalk::new(&self.registry)
            .find(&self.store.properties, member)
            .map(|(_, config)| config)
    }

    /// Whether `member` is ignored, directly or through inheritance.
    pub fn is_ignored(&self, member: &MemberId) -> bool {
        ResolutionWalk::new(&self.registry).contains(&self.store.ignored, member)
    }

    fn is_interface(&self, ty: &Type) -> bool {
        self.registry.get(&ty.id()).is_some_and(|info| info.is_interface())
    }

    /// Default members, then configured non-default members, minus ignored
    /// ones.
    fn serializable_members(&self, ty: &Type) -> Vec<&MemberInfo> {
        let walk = ResolutionWalk::new(&self.registry);
        let visible = self.registry.visible_members(ty);
        let mut members = self.registry.default_members(ty);

        for &member in &visible {
            let Some((configured, _)) = walk.find(&self.store.properties, member.id()) else {
                continue;
            };

            // An explicit implementation is serialized as the interface member.
            let candidate = if member.implements().is_some() && self.is_interface(configured.declaring()) {
                match self.registry.member(configured) {
                    Some(iface_member) => iface_member,
                    None => continue,
                }
            } else {
                member
            };

            if !members.iter().any(|m| m.id() == candidate.id()) {
                members.push(candidate);
            }
        }

        members.retain(|m| !walk.contains(&self.store.ignored, m.id()));
        members
    }

    fn create_property(&self, member: &MemberInfo) -> ContractProperty {
        let (name, required, condition) = match self.property_config(member.id()) {
            Some(config) => {
                let required = if config.is_required {
                    Required::Always
                } else if self.store.allow_null_values {
                    Required::Default
                } else {
                    Required::DisallowNull
                };
                (config.name.clone(), required, config.condition.clone())
            }
            None => (member.id().name_arc().clone(), Required::Default, None),
        };

        ContractProperty {
            member: member.id().clone(),
            name,
            required,
            readable: member.can_read(),
            writable: member.can_write(),
            condition,
            value_type: member.value_type_name(),
            registry: self.registry.clone(),
        }
    }

    fn create_contract(&self, ty: &Type) -> Result<Contract, ResolveError> {
        let info = self
            .registry
            .get(&ty.id())
            .ok_or(ResolveError::UnregisteredType { ty: ty.path() })?;

        let mut properties = ContractProperties::default();
        for member in self.serializable_members(ty) {
            properties.add(self.create_property(member), &self.registry)?;
        }

        let default_creator = self
            .store
            .default_creators
            .get(ty)
            .or(info.default_factory())
            .cloned();
        let override_creator = self.store.override_creators.get(ty).cloned();
        let creator_parameters = override_creator
            .as_ref()
            .and_then(OverrideCreator::declared_params)
            .or(info.constructor())
            .cloned()
            .unwrap_or_else(|| Vec::new().into());

        log::debug!(
            "assembled contract for `{ty}`: {} properties, default creator: {}, override creator: {}",
            properties.len(),
            default_creator.is_some(),
            override_creator.is_some(),
        );

        Ok(Contract {
            ty: *ty,
            properties,
            default_creator,
            override_creator,
            creator_parameters,
        })
    }
}

impl ContractResolver for FluentContractResolver {
    fn resolve_contract(&self, ty: &Type) -> Result<Arc<Contract>, ResolveError> {
        if let Some(contract) = self.cache.read().get(ty) {
            return Ok(contract.clone());
        }

        let contract = Arc::new(self.create_contract(ty)?);
        Ok(self.cache.write().entry(*ty).or_insert(contract).clone())
    }
}

impl fmt::Debug for FluentContractResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluentContractResolver")
            .field("allow_null_values", &self.store.allow_null_values)
            .field("cached", &self.cache.read().len())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests
