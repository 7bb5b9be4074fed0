//! Descriptions of host types.
//!
//! ## Menu
//!
//! - [`TypePath`]: static type names, defaulting to [`core::any::type_name`].
//! - [`Type`]: a `TypeId` plus a [`TypePathTable`].
//! - [`TypeInfo`]: a class or interface, built with [`TypeBuilder`].
//!     - [`BaseLink`]: base class plus upcast projections.
//!     - [`TypeKind`]: `Class` or `Interface`.
//! - [`MemberInfo`]: a field or property, built with [`MemberBuilder`].
//!     - [`MemberId`]: declaring type, name and [`MemberKind`].
//!     - [`Visibility`] and [`Dispatch`].
//! - [`ParamInfo`]: a named, typed constructor parameter.
//! - [`Typed`]: a type that describes itself.

// -----------------------------------------------------------------------------
// Modules

mod member_info;
mod param_info;
mod type_info;
mod type_path;

// -----------------------------------------------------------------------------
// Exports

pub use member_info::{Dispatch, MemberBuilder, MemberId, MemberInfo, MemberKind, Visibility};
pub use param_info::ParamInfo;
pub use type_info::{BaseLink, TypeBuilder, TypeInfo, TypeKind, Typed};
pub use type_path::{Type, TypePath, TypePathTable};
