//! The configuration surface.

mod type_config;

pub use type_config::{PropertyConfigurator, TypeConfigurator};

use alloc::sync::Arc;
use core::fmt;

use fj_reflect::info::{Type, TypePath};
use fj_reflect::registry::TypeRegistry;
use fj_utils::hash::HashMap;

use crate::binder::{AliasBinder, DefaultSerializationBinder, SerializationBinder};
use crate::contract::FluentContractResolver;
use crate::store::ConfigStore;
use crate::{ConfigError, Configuration};

use type_config::Batch;

// -----------------------------------------------------------------------------
// Configurator

/// Collects serialization settings, type by type.
///
/// Each type is configured once, through [`configure`](Self::configure).
/// [`complete`](Self::complete) seals the settings into a [`Configuration`].
///
/// # Examples
///
/// ```
/// use fj_contract::{ConfigError, Configurator, SerializationBinder};
/// use fj_reflect::info::{Type, TypeInfo, TypePath, Typed};
/// use fj_reflect::registry::TypeRegistry;
///
/// struct Cat;
/// impl TypePath for Cat {}
/// impl Typed for Cat {
///     fn type_info() -> TypeInfo {
///         TypeInfo::class::<Self>().build()
///     }
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Cat>();
///
/// let mut configurator = Configurator::new(registry);
/// configurator.configure::<Cat>(|t| {
///     t.has_contract_name("cat")?;
///     Ok(())
/// })?;
///
/// let err = configurator.configure::<Cat>(|_| Ok(())).unwrap_err();
/// assert!(matches!(err, ConfigError::AlreadyConfigured { .. }));
///
/// let configuration = configurator.complete();
/// assert_eq!(configuration.bind_to_name(&Type::of::<Cat>()), (None, "cat"));
/// # Ok::<(), ConfigError>(())
/// ```
pub struct Configurator {
    registry: Arc<TypeRegistry>,
    store: ConfigStore,
    configured: Vec<Type>,
    type_to_name: HashMap<Type, Arc<str>>,
    name_to_type: HashMap<Arc<str>, Type>,
    base_binder: Option<Arc<dyn SerializationBinder>>,
}

impl Configurator {
    /// Creates an empty configurator over the described types.
    pub fn new(registry: impl Into<Arc<TypeRegistry>>) -> Self {
        Self {
            registry: registry.into(),
            store: ConfigStore::new(),
            configured: Vec::new(),
            type_to_name: HashMap::default(),
            name_to_type: HashMap::default(),
            base_binder: None,
        }
    }

    #[inline]
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// Whether `ty` went through [`configure`](Self::configure).
    #[inline]
    pub fn is_configured(&self, ty: &Type) -> bool {
        self.configured.contains(ty)
    }

    /// Makes optional configured properties reject `null`.
    pub fn disallow_null_values(&mut self) -> &mut Self {
        self.store.allow_null_values = false;
        self
    }

    /// Replaces the binder used for types without a contract name.
    pub fn with_base_binder(&mut self, binder: impl SerializationBinder + 'static) -> &mut Self {
        self.base_binder = Some(Arc::new(binder));
        self
    }

    /// Configures `T`.
    ///
    /// The closure runs against a staging area: when it fails, nothing it
    /// declared is kept and `T` can be configured again.
    pub fn configure<T: TypePath + ?Sized>(
        &mut self,
        f: impl FnOnce(&mut TypeConfigurator<'_, T>) -> Result<(), ConfigError>,
    ) -> Result<&mut Self, ConfigError> {
        let ty = Type::of::<T>();
        if self.is_configured(&ty) {
            return Err(ConfigError::AlreadyConfigured { ty: ty.path() });
        }
        if !self.registry.contains(&ty.id()) {
            return Err(ConfigError::UnregisteredType { ty: ty.path() });
        }

        let mut config = TypeConfigurator::new(self, ty);
        f(&mut config)?;
        let batch = config.into_batch();
        self.commit(batch);
        Ok(self)
    }

    fn commit(&mut self, batch: Batch) {
        let Batch {
            ty,
            properties,
            ignored,
            alias,
            default_creator,
            override_creator,
        } = batch;

        log::debug!(
            "configured `{ty}`: {} properties, {} ignored, alias: {:?}",
            properties.len(),
            ignored.len(),
            alias,
        );

        if !properties.is_empty() {
            self.store.properties.insert(ty, properties);
        }
        if !ignored.is_empty() {
            let ignored = ignored.into_iter().map(|member| (member, ())).collect();
            self.store.ignored.insert(ty, ignored);
        }
        if let Some(factory) = default_creator {
            self.store.default_creators.insert(ty, factory);
        }
        if let Some(creator) = override_creator {
            self.store.override_creators.insert(ty, creator);
        }
        if let Some(alias) = alias {
            self.type_to_name.insert(ty, alias.clone());
            self.name_to_type.insert(alias, ty);
        }
        self.configured.push(ty);
    }

    /// Seals the configuration.
    pub fn complete(self) -> Configuration {
        let Self {
            registry,
            store,
            configured,
            type_to_name,
            name_to_type,
            base_binder,
        } = self;

        log::debug!("configuration completed with {} configured types", configured.len());

        let base = base_binder
            .unwrap_or_else(|| Arc::new(DefaultSerializationBinder::new(registry.clone())));
        let binder = AliasBinder::new(base, type_to_name, name_to_type);
        let resolver = FluentContractResolver::new(registry, store);
        Configuration::new(Arc::new(resolver), Arc::new(binder))
    }
}

impl fmt::Debug for Configurator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configurator")
            .field("configured", &self.configured)
            .field("aliases", &self.type_to_name)
            .field("allow_null_values", &self.store.allow_null_values)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests
