//! Fluent serialization configuration and contract resolution.
//!
//! Configuration is declared per type on a [`Configurator`], then sealed by
//! [`Configurator::complete`] into a [`Configuration`] that serves two
//! extension points of a JSON host:
//!
//! - [`ContractResolver`]: the ordered, decorated member list of a type.
//! - [`SerializationBinder`]: type ↔ name mapping for polymorphic documents.
//!
//! Settings declared on a base class, on an interface, or on an overridden
//! property flow to derived types and implementations; members that hide a
//! base member start fresh.
//!
//! # Examples
//!
//! ```
//! use fj_contract::{Configurator, ContractResolver, Required};
//! use fj_reflect::info::{MemberInfo, Type, TypeInfo, TypePath, Typed};
//! use fj_reflect::registry::TypeRegistry;
//!
//! #[derive(Default)]
//! struct Cat { age: i32, paws: i32 }
//!
//! impl TypePath for Cat {}
//! impl Typed for Cat {
//!     fn type_info() -> TypeInfo {
//!         TypeInfo::class::<Self>()
//!             .with_default()
//!             .member(MemberInfo::property::<Self, i32>("Age").getter(|c| c.age).setter(|c, v| c.age = v))
//!             .member(MemberInfo::property::<Self, i32>("Paws").getter(|c| c.paws).setter(|c, v| c.paws = v))
//!             .build()
//!     }
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<Cat>();
//!
//! let mut configurator = Configurator::new(registry);
//! configurator.configure::<Cat>(|t| {
//!     t.has_required_property(|m| m.get("Age"), |p| p.has_name("a"))?
//!         .has_optional_property(|m| m.get("Paws"), |p| p.has_name("p"))?;
//!     Ok(())
//! })?;
//!
//! let configuration = configurator.complete();
//! let contract = configuration.resolve_contract(&Type::of::<Cat>())?;
//!
//! let age = contract.properties().get("a").unwrap();
//! assert_eq!(age.required(), Required::Always);
//! assert!(contract.properties().get("p").is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod binder;
mod config;
mod configuration;
mod contract;
mod creator;
mod error;
mod lookup;
mod select;
mod store;

#[cfg(test)]
mod testing;

// -----------------------------------------------------------------------------
// Exports

pub use binder::{AliasBinder, DefaultSerializationBinder, SerializationBinder};
pub use config::{Configurator, PropertyConfigurator, TypeConfigurator};
pub use configuration::Configuration;
pub use contract::{Contract, ContractProperties, ContractProperty, ContractResolver};
pub use contract::{FluentContractResolver, Required};
pub use creator::{CreatorArgs, IntoOverrideCreator, OverrideCreator};
pub use error::{BindError, ConfigError, CreateError, ResolveError};
pub use select::MemberPath;
pub use store::{PropertyConfig, SerializeCondition};
