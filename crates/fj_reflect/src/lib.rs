//! Host type model for `fluent_json`.
//!
//! Rust has no runtime class hierarchy, so the shapes that contract
//! resolution reasons about are described explicitly and collected in a
//! [`TypeRegistry`](registry::TypeRegistry):
//!
//! - [`info::Type`]: a `TypeId` with its path table.
//! - [`info::TypeInfo`]: a class or an interface, its base link, the
//!   interfaces it implements, its members and its constructors.
//! - [`info::MemberInfo`]: a field or property with visibility, virtual
//!   dispatch, and type-erased accessors.
//! - [`info::MemberId`]: the identity of a member, used as a key everywhere.
//!
//! # Examples
//!
//! ```
//! use fj_reflect::info::{MemberInfo, TypeInfo, TypePath, Typed};
//! use fj_reflect::registry::TypeRegistry;
//!
//! #[derive(Default)]
//! struct Animal { age: i32 }
//!
//! impl TypePath for Animal {}
//! impl Typed for Animal {
//!     fn type_info() -> TypeInfo {
//!         TypeInfo::class::<Self>()
//!             .with_default()
//!             .member(
//!                 MemberInfo::property::<Self, i32>("Age")
//!                     .getter(|a| a.age)
//!                     .setter(|a, v| a.age = v),
//!             )
//!             .build()
//!     }
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<Animal>();
//!
//! let info = registry.get_type::<Animal>().unwrap();
//! assert_eq!(info.members().len(), 1);
//! assert_eq!(info.type_name(), "Animal");
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod access;
pub mod info;
pub mod registry;
