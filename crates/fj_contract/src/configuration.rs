use alloc::sync::Arc;

use fj_reflect::info::Type;
use fj_reflect::registry::TypeRegistry;

use crate::{AliasBinder, BindError, Contract, ContractResolver, FluentContractResolver};
use crate::{ResolveError, SerializationBinder};

// -----------------------------------------------------------------------------
// Configuration

/// A sealed configuration: the contract resolver and the type binder.
///
/// Cheap to clone and safe to share between threads.
#[derive(Clone, Debug)]
pub struct Configuration {
    resolver: Arc<FluentContractResolver>,
    binder: Arc<AliasBinder>,
}

impl Configuration {
    #[inline]
    pub(crate) fn new(resolver: Arc<FluentContractResolver>, binder: Arc<AliasBinder>) -> Self {
        Self { resolver, binder }
    }

    #[inline]
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        self.resolver.registry()
    }

    #[inline]
    pub fn resolver(&self) -> &Arc<FluentContractResolver> {
        &self.resolver
    }

    #[inline]
    pub fn binder(&self) -> &Arc<AliasBinder> {
        &self.binder
    }
}

impl ContractResolver for Configuration {
    #[inline]
    fn resolve_contract(&self, ty: &Type) -> Result<Arc<Contract>, ResolveError> {
        self.resolver.resolve_contract(ty)
    }
}

impl SerializationBinder for Configuration {
    #[inline]
    fn bind_to_name(&self, ty: &Type) -> (Option<&str>, &str) {
        self.binder.bind_to_name(ty)
    }

    #[inline]
    fn bind_to_type(&self, qualifier: Option<&str>, name: &str) -> Result<Type, BindError> {
        self.binder.bind_to_type(qualifier, name)
    }
}
