//! The type registry and its hierarchy queries.
//!
//! - [`TypeRegistry`]: storage and lookup by `TypeId`, path and short name.
//! - Hierarchy: [`lineage`](TypeRegistry::lineage),
//!   [`interfaces_of`](TypeRegistry::interfaces_of),
//!   [`is_assignable_from`](TypeRegistry::is_assignable_from),
//!   [`visible_members`](TypeRegistry::visible_members),
//!   [`base_definition`](TypeRegistry::base_definition),
//!   [`interface_map`](TypeRegistry::interface_map).
//! - Instances: [`upcast_ref`](TypeRegistry::upcast_ref),
//!   [`get_value`](TypeRegistry::get_value),
//!   [`set_value`](TypeRegistry::set_value).

// -----------------------------------------------------------------------------
// Modules

mod hierarchy;
mod type_registry;
mod values;

// -----------------------------------------------------------------------------
// Exports

pub use hierarchy::Lineage;
pub use type_registry::TypeRegistry;

// -----------------------------------------------------------------------------
// Tests
