//! Animals shared by the unit tests.

use alloc::sync::Arc;

use fj_reflect::info::{MemberInfo, ParamInfo, TypeInfo, TypePath, Typed};
use fj_reflect::registry::TypeRegistry;
use serde::{Deserialize, Serialize};

pub(crate) trait Measured {}

#[derive(Default, Debug, PartialEq)]
pub(crate) struct Animal {
    pub(crate) age: i32,
}

#[derive(Default, Debug, PartialEq)]
pub(crate) struct Cat {
    pub(crate) base: Animal,
    pub(crate) paws: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Collar {
    pub(crate) color: String,
    pub(crate) bells: u8,
}

#[derive(Default, Debug, PartialEq)]
pub(crate) struct Bird {
    pub(crate) base: Animal,
    pub(crate) wings: i32,
    pub(crate) ring: Option<Collar>,
}

#[derive(Debug, PartialEq)]
pub(crate) struct Dog {
    pub(crate) base: Animal,
    pub(crate) tail: i32,
}

impl Dog {
    pub(crate) fn new(age: i32, tail: i32) -> Self {
        Self {
            base: Animal { age },
            tail,
        }
    }
}

#[derive(Default, Debug, PartialEq)]
pub(crate) struct Sensor {
    pub(crate) id: i32,
    pub(crate) limit: i32,
}

impl TypePath for dyn Measured {}
impl TypePath for Animal {}
impl TypePath for Cat {}
impl TypePath for Bird {}
impl TypePath for Dog {}
impl TypePath for Sensor {}

impl Typed for dyn Measured {
    fn type_info() -> TypeInfo {
        TypeInfo::interface::<Self>()
            .member(MemberInfo::property::<Self, i32>("Reading").readable())
            .member(MemberInfo::property::<Self, i32>("Limit").readable().writable())
            .build()
    }
}

impl Typed for Animal {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Self>()
            .member(
                MemberInfo::property::<Self, i32>("Age")
                    .getter(|a| a.age)
                    .setter(|a, v| a.age = v),
            )
            .build()
    }
}

impl Typed for Cat {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Self>()
            .extends::<Animal>(|c| &c.base, |c| &mut c.base)
            .with_default()
            .member(
                MemberInfo::property::<Self, i32>("Paws")
                    .getter(|c| c.paws)
                    .setter(|c, v| c.paws = v),
            )
            .build()
    }
}

impl Typed for Bird {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Self>()
            .extends::<Animal>(|c| &c.base, |c| &mut c.base)
            .with_default()
            .member(
                MemberInfo::property::<Self, i32>("Wings")
                    .getter(|b| b.wings)
                    .setter(|b, v| b.wings = v),
            )
            .member(
                MemberInfo::property::<Self, Option<Collar>>("Ring")
                    .getter(|b| b.ring.clone())
                    .setter(|b, v| b.ring = v),
            )
            .build()
    }
}

impl Typed for Dog {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Self>()
            .extends::<Animal>(|c| &c.base, |c| &mut c.base)
            .constructor([ParamInfo::of::<i32>("age"), ParamInfo::of::<i32>("tail")])
            .member(
                MemberInfo::property::<Self, i32>("Tail")
                    .getter(|d| d.tail)
                    .setter(|d, v| d.tail = v),
            )
            .build()
    }
}

impl Typed for Sensor {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Self>()
            .implements::<dyn Measured>()
            .with_default()
            .member(
                MemberInfo::property::<Self, i32>("Id")
                    .getter(|s| s.id)
                    .setter(|s, v| s.id = v),
            )
            .member(MemberInfo::explicit::<Self, dyn Measured, i32>("Reading").getter(|s| s.id * 10))
            .member(
                MemberInfo::explicit::<Self, dyn Measured, i32>("Limit")
                    .getter(|s| s.limit)
                    .setter(|s, v| s.limit = v),
            )
            .build()
    }
}

pub(crate) fn registry() -> Arc<TypeRegistry> {
    let mut registry = TypeRegistry::new();
    registry.register::<dyn Measured>();
    registry.register::<Animal>();
    registry.register::<Cat>();
    registry.register::<Bird>();
    registry.register::<Dog>();
    registry.register::<Sensor>();
    Arc::new(registry)
}
