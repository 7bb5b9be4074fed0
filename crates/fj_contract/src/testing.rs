//! Type hierarchy shared by the unit tests.

use alloc::sync::Arc;

use fj_reflect::info::{MemberInfo, ParamInfo, TypeInfo, TypePath, Typed};
use fj_reflect::registry::TypeRegistry;

pub(crate) trait TestObject {}
pub(crate) trait TestObject2 {}
pub(crate) trait TestInterface3 {}

#[derive(Default)]
pub(crate) struct A {
    pub(crate) property1: i32,
    pub(crate) property2: Option<i32>,
}

#[derive(Default)]
pub(crate) struct A2 {
    pub(crate) base: A,
}

#[derive(Default)]
pub(crate) struct A22 {
    pub(crate) base: A2,
}

#[derive(Default)]
pub(crate) struct A3 {
    pub(crate) base: A,
    pub(crate) property1: i32,
}

#[derive(Default)]
pub(crate) struct B {
    pub(crate) base: A,
    pub(crate) property4: bool,
    pub(crate) property5: bool,
}

#[derive(Default)]
pub(crate) struct C {
    pub(crate) property1: i32,
}

#[derive(Default)]
pub(crate) struct ExplicitImpl {
    pub(crate) property0: i32,
    pub(crate) property2: i32,
}

#[derive(Default)]
pub(crate) struct Both {
    pub(crate) property1: i32,
    pub(crate) hidden1: i32,
}

#[derive(Default)]
pub(crate) struct X {
    pub(crate) property_x: i32,
    pub(crate) property_x2: i32,
}

#[derive(Default)]
pub(crate) struct Y {
    pub(crate) base: X,
    pub(crate) property_y: Vec<i32>,
}

pub(crate) struct Z {
    pub(crate) value: i32,
}

impl TypePath for dyn TestObject {}
impl TypePath for dyn TestObject2 {}
impl TypePath for dyn TestInterface3 {}
impl TypePath for A {}
impl TypePath for A2 {}
impl TypePath for A22 {}
impl TypePath for A3 {}
impl TypePath for B {}
impl TypePath for C {}
impl TypePath for ExplicitImpl {}
impl TypePath for Both {}
impl TypePath for X {}
impl TypePath for Y {}
impl TypePath for Z {}

impl Typed for dyn TestObject {
    fn type_info() -> TypeInfo {
        TypeInfo::interface::<Self>()
            .member(MemberInfo::property::<Self, i32>("Property1").readable())
            .build()
    }
}

impl Typed for dyn TestObject2 {
    fn type_info() -> TypeInfo {
        TypeInfo::interface::<Self>()
            .member(MemberInfo::property::<Self, bool>("Property4").readable())
            .build()
    }
}

impl Typed for dyn TestInterface3 {
    fn type_info() -> TypeInfo {
        TypeInfo::interface::<Self>()
            .member(MemberInfo::property::<Self, i32>("Property1").readable())
            .member(MemberInfo::property::<Self, i32>("Property2").readable().writable())
            .build()
    }
}

impl Typed for A {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Self>()
            .implements::<dyn TestObject>()
            .with_default()
            .member(
                MemberInfo::property::<Self, i32>("Property1")
                    .getter(|a| a.property1)
                    .setter(|a, v| a.property1 = v)
                    .as_virtual(),
            )
            .member(
                MemberInfo::property::<Self, Option<i32>>("Property2")
                    .getter(|a| a.property2)
                    .setter(|a, v| a.property2 = v)
                    .private_setter(),
            )
            .member(MemberInfo::property::<Self, String>("Property3").getter(|_| String::from("FooBar")))
            .build()
    }
}

impl Typed for A2 {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Self>()
            .extends::<A>(|c| &c.base, |c| &mut c.base)
            .with_default()
            .member(
                MemberInfo::property::<Self, i32>("Property1")
                    .getter(|c| c.base.property1)
                    .setter(|c, v| c.base.property1 = v)
                    .as_override(),
            )
            .build()
    }
}

impl Typed for A22 {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Self>()
            .extends::<A2>(|c| &c.base, |c| &mut c.base)
            .with_default()
            .member(
                MemberInfo::property::<Self, i32>("Property1")
                    .getter(|c| c.base.base.property1)
                    .setter(|c, v| c.base.base.property1 = v)
                    .as_override(),
            )
            .build()
    }
}

impl Typed for A3 {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Self>()
            .extends::<A>(|c| &c.base, |c| &mut c.base)
            .with_default()
            .member(
                MemberInfo::property::<Self, i32>("Property1")
                    .getter(|c| c.property1)
                    .setter(|c, v| c.property1 = v),
            )
            .build()
    }
}

impl Typed for B {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Self>()
            .extends::<A>(|c| &c.base, |c| &mut c.base)
            .implements::<dyn TestObject2>()
            .with_default()
            .member(
                MemberInfo::property::<Self, bool>("Property4")
                    .getter(|b| b.property4)
                    .setter(|b, v| b.property4 = v),
            )
            .member(
                MemberInfo::property::<Self, bool>("Property5")
                    .getter(|b| b.property5)
                    .setter(|b, v| b.property5 = v),
            )
            .build()
    }
}

impl Typed for C {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Self>()
            .with_default()
            .member(
                MemberInfo::property::<Self, i32>("Property1")
                    .getter(|c| c.property1)
                    .setter(|c, v| c.property1 = v),
            )
            .build()
    }
}

impl Typed for ExplicitImpl {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Self>()
            .implements::<dyn TestInterface3>()
            .with_default()
            .member(
                MemberInfo::property::<Self, i32>("Property0")
                    .getter(|e| e.property0)
                    .setter(|e, v| e.property0 = v),
            )
            .member(MemberInfo::explicit::<Self, dyn TestInterface3, i32>("Property1").getter(|e| e.property0))
            .member(
                MemberInfo::explicit::<Self, dyn TestInterface3, i32>("Property2")
                    .getter(|e| e.property2)
                    .setter(|e, v| e.property2 = v),
            )
            .build()
    }
}

impl Typed for Both {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Self>()
            .implements::<dyn TestInterface3>()
            .with_default()
            .member(
                MemberInfo::property::<Self, i32>("Property1")
                    .getter(|b| b.property1)
                    .setter(|b, v| b.property1 = v),
            )
            .member(MemberInfo::explicit::<Self, dyn TestInterface3, i32>("Property1").getter(|b| b.hidden1))
            .build()
    }
}

impl Typed for X {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Self>()
            .with_default()
            .member(
                MemberInfo::property::<Self, i32>("PropertyX")
                    .getter(|x| x.property_x)
                    .setter(|x, v| x.property_x = v)
                    .internal(),
            )
            .member(
                MemberInfo::property::<Self, i32>("PropertyX2")
                    .getter(|x| x.property_x2)
                    .setter(|x, v| x.property_x2 = v)
                    .internal()
                    .private_setter(),
            )
            .build()
    }
}

impl Typed for Y {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Self>()
            .extends::<X>(|c| &c.base, |c| &mut c.base)
            .with_default()
            .member(
                MemberInfo::property::<Self, Vec<i32>>("PropertyY")
                    .getter(|y| y.property_y.clone())
                    .internal(),
            )
            .build()
    }
}

impl Typed for Z {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Self>()
            .constructor([ParamInfo::of::<i32>("ctorParameter")])
            .build()
    }
}

pub(crate) fn registry() -> Arc<TypeRegistry> {
    let mut registry = TypeRegistry::new();
    registry.register::<dyn TestObject>();
    registry.register::<dyn TestObject2>();
    registry.register::<dyn TestInterface3>();
    registry.register::<A>();
    registry.register::<A2>();
    registry.register::<A22>();
    registry.register::<A3>();
    registry.register::<B>();
    registry.register::<C>();
    registry.register::<ExplicitImpl>();
    registry.register::<Both>();
    registry.register::<X>();
    registry.register::<Y>();
    registry.register::<Z>();
    Arc::new(registry)
}
