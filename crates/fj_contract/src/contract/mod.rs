//! Contracts: the resolved serialization shape of a type.

mod property;
mod resolver;

pub use property::{ContractProperties, ContractProperty, Required};
pub use resolver::FluentContractResolver;

use alloc::sync::Arc;
use core::any::Any;

use fj_reflect::access::Factory;
use fj_reflect::info::{ParamInfo, Type};

use crate::{OverrideCreator, ResolveError};

// -----------------------------------------------------------------------------
// ContractResolver

/// Resolves the [`Contract`] of a type.
pub trait ContractResolver: Send + Sync {
    fn resolve_contract(&self, ty: &Type) -> Result<Arc<Contract>, ResolveError>;
}

// -----------------------------------------------------------------------------
// Contract

/// Everything a JSON host needs to read or write instances of one type.
#[derive(Debug)]
pub struct Contract {
    pub(crate) ty: Type,
    pub(crate) properties: ContractProperties,
    pub(crate) default_creator: Option<Factory>,
    pub(crate) override_creator: Option<OverrideCreator>,
    pub(crate) creator_parameters: Arc<[ParamInfo]>,
}

impl Contract {
    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Serialized properties, base class members first.
    #[inline]
    pub fn properties(&self) -> &ContractProperties {
        &self.properties
    }

    /// The zero-argument factory, configured or registered.
    #[inline]
    pub fn default_creator(&self) -> Option<&Factory> {
        self.default_creator.as_ref()
    }

    /// The configured parametrized factory.
    #[inline]
    pub fn override_creator(&self) -> Option<&OverrideCreator> {
        self.override_creator.as_ref()
    }

    /// Parameters passed to the [`override_creator`](Self::override_creator).
    #[inline]
    pub fn creator_parameters(&self) -> &Arc<[ParamInfo]> {
        &self.creator_parameters
    }

    /// Creates an instance with the default creator, if there is one.
    #[inline]
    pub fn create_default(&self) -> Option<Box<dyn Any>> {
        self.default_creator.as_ref().map(Factory::create)
    }
}
