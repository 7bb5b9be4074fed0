//! JSON host driver for `fj_contract` configurations.
//!
//! A [`JsonSerializer`] reads and writes `serde_json` documents through the
//! two extension points of a sealed [`Configuration`]:
//!
//! # Overview
//!
//! ## Serialization
//!
//! - The runtime type of the value is looked up in the registry and its
//!   contract is resolved.
//! - Readable properties are written under their serialized names, in
//!   contract order, unless their serialize condition rejects the instance.
//! - Member values are written with their own `serde` implementation.
//! - The discriminator (`"$type"` by default) is written according to
//!   [`TypeNameHandling`], formatted as `"name"` or `"name, qualifier"`.
//!
//! ## Deserialization
//!
//! - A discriminator, if present and enabled, is bound back to a type which
//!   must be assignable to the requested one.
//! - Properties with [`Required::Always`](fj_contract::Required::Always)
//!   must be present and not `null`.
//! - The instance is built by the override creator, fed with the members
//!   matching its parameter names, or else by the default creator.
//! - Remaining members are written to writable properties. Unknown members
//!   are skipped. Names are matched exactly first, then ignoring ASCII case.
//!
//! # Examples
//!
//! ```
//! use fj_contract::Configurator;
//! use fj_reflect::info::{MemberInfo, TypeInfo, TypePath, Typed};
//! use fj_reflect::registry::TypeRegistry;
//! use fj_serde::JsonSerializer;
//!
//! #[derive(Default)]
//! struct Cat { age: i32 }
//!
//! impl TypePath for Cat {}
//! impl Typed for Cat {
//!     fn type_info() -> TypeInfo {
//!         TypeInfo::class::<Self>()
//!             .with_default()
//!             .member(MemberInfo::property::<Self, i32>("Age").getter(|c| c.age).setter(|c, v| c.age = v))
//!             .build()
//!     }
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<Cat>();
//!
//! let mut configurator = Configurator::new(registry);
//! configurator.configure::<Cat>(|t| {
//!     t.has_required_property(|m| m.get("Age"), |p| p.has_name("a"))?;
//!     Ok(())
//! })?;
//! let configuration = configurator.complete();
//!
//! let serializer = JsonSerializer::new(&configuration);
//! let cat: Cat = serializer.from_str(r#"{"a":5}"#)?;
//! assert_eq!(cat.age, 5);
//! assert_eq!(serializer.to_string(&cat)?, r#"{"a":5}"#);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`Configuration`]: fj_contract::Configuration

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod de;
mod error;
mod ser;
mod serializer;
mod settings;

#[cfg(test)]
mod testing;

// -----------------------------------------------------------------------------
// Exports

pub use error::Error;
pub use serializer::JsonSerializer;
pub use settings::{JsonSettings, TypeNameHandling};
