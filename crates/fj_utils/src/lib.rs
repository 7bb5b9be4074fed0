//! Small shared containers for the `fluent_json` crates.
//!
//! - [`hash`]: `hashbrown` containers with a fixed `foldhash` seed, so that
//!   iteration order depends only on the inserted keys.
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId).
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;
