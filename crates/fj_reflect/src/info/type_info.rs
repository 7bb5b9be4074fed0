use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;
use core::marker::PhantomData;

use crate::access::Factory;
use crate::info::{MemberId, MemberInfo, MemberKind, ParamInfo, Type, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// A type that can describe itself for the registry.
///
/// Implemented by hand for classes (`struct`s) and for interfaces
/// (`dyn Trait` objects).
pub trait Typed: TypePath {
    /// Returns the description of `Self`.
    fn type_info() -> TypeInfo;
}

// -----------------------------------------------------------------------------
// TypeKind

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A concrete type with optional base type and interfaces.
    Class,
    /// An abstract member set, described on a `dyn Trait` type.
    Interface,
}

// -----------------------------------------------------------------------------
// BaseLink

trait ErasedUpcast: Send + Sync {
    fn upcast<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn Any>;
    fn upcast_mut<'a>(&self, value: &'a mut dyn Any) -> Option<&'a mut dyn Any>;
}

struct Upcast<T, B> {
    as_base: fn(&T) -> &B,
    as_base_mut: fn(&mut T) -> &mut B,
}

impl<T: Any, B: Any> ErasedUpcast for Upcast<T, B> {
    fn upcast<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn Any> {
        let derived = value.downcast_ref::<T>()?;
        let base: &dyn Any = (self.as_base)(derived);
        Some(base)
    }

    fn upcast_mut<'a>(&self, value: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        let derived = value.downcast_mut::<T>()?;
        let base: &mut dyn Any = (self.as_base_mut)(derived);
        Some(base)
    }
}

/// Link from a derived class to its base class.
///
/// Derived structs embed their base, so an upcast is a projection onto the
/// embedded part.
#[derive(Clone)]
pub struct BaseLink {
    ty: Type,
    upcast: Arc<dyn ErasedUpcast>,
}

impl BaseLink {
    /// The base type.
    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Projects a derived instance onto its base part.
    ///
    /// Returns `None` if `value` is not of the derived type.
    #[inline]
    pub fn upcast<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn Any> {
        self.upcast.upcast(value)
    }

    /// Mutable version of [`upcast`](Self::upcast).
    #[inline]
    pub fn upcast_mut<'a>(&self, value: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        self.upcast.upcast_mut(value)
    }
}

impl fmt::Debug for BaseLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BaseLink").field(&self.ty).finish()
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Description of a class or interface.
///
/// Created through [`TypeInfo::class`] or [`TypeInfo::interface`].
#[derive(Clone, Debug)]
pub struct TypeInfo {
    ty: Type,
    kind: TypeKind,
    base: Option<BaseLink>,
    interfaces: Vec<Type>,
    members: Vec<MemberInfo>,
    constructor: Option<Arc<[ParamInfo]>>,
    default_factory: Option<Factory>,
}

impl TypeInfo {
    fn empty(ty: Type, kind: TypeKind) -> Self {
        Self {
            ty,
            kind,
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            constructor: None,
            default_factory: None,
        }
    }

    /// Starts describing the class `T`.
    pub fn class<T: TypePath>() -> TypeBuilder<T> {
        TypeBuilder::new(Self::empty(Type::of::<T>(), TypeKind::Class))
    }

    /// Starts describing the interface `T`, usually a `dyn Trait`.
    pub fn interface<T: TypePath + ?Sized>() -> TypeBuilder<T> {
        TypeBuilder::new(Self::empty(Type::of::<T>(), TypeKind::Interface))
    }

    /// Returns the underlying `Type`.
    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.ty.name()
    }

    #[inline]
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    #[inline]
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    #[inline]
    pub fn base(&self) -> Option<&BaseLink> {
        self.base.as_ref()
    }

    /// Interfaces listed directly on this type.
    ///
    /// For an interface these are the interfaces it extends.
    #[inline]
    pub fn interfaces(&self) -> &[Type] {
        &self.interfaces
    }

    /// Members declared on this type, in declaration order.
    #[inline]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// Finds a declared member by name and kind.
    pub fn member(&self, name: &str, kind: MemberKind) -> Option<&MemberInfo> {
        self.members
            .iter()
            .find(|m| m.kind() == kind && m.name() == name)
    }

    /// Finds a declared member by id.
    #[inline]
    pub fn member_by_id(&self, id: &MemberId) -> Option<&MemberInfo> {
        if id.declaring() != &self.ty {
            return None;
        }
        self.member(id.name(), id.kind())
    }

    /// Parameters of the registered parametrized constructor.
    #[inline]
    pub fn constructor(&self) -> Option<&Arc<[ParamInfo]>> {
        self.constructor.as_ref()
    }

    /// The registered zero-argument constructor.
    #[inline]
    pub fn default_factory(&self) -> Option<&Factory> {
        self.default_factory.as_ref()
    }
}

// -----------------------------------------------------------------------------
// TypeBuilder

/// Typed builder for [`TypeInfo`].
pub struct TypeBuilder<T: ?Sized> {
    info: TypeInfo,
    _marker: PhantomData<fn() -> *const T>,
}

impl<T: TypePath + ?Sized> TypeBuilder<T> {
    #[inline]
    fn new(info: TypeInfo) -> Self {
        Self {
            info,
            _marker: PhantomData,
        }
    }

    /// Declares that `T` implements (or, for interfaces, extends) `I`.
    pub fn implements<I: TypePath + ?Sized>(mut self) -> Self {
        let iface = Type::of::<I>();
        if !self.info.interfaces.contains(&iface) {
            self.info.interfaces.push(iface);
        }
        self
    }

    /// Adds a member declared on `T`.
    pub fn member(mut self, member: impl Into<MemberInfo>) -> Self {
        let member = member.into();
        debug_assert!(
            member.declaring() == &self.info.ty,
            "member `{}` does not belong to `{}`",
            member.id(),
            self.info.ty,
        );
        self.info.members.push(member);
        self
    }

    /// Finishes the description.
    #[inline]
    pub fn build(self) -> TypeInfo {
        self.info
    }
}

impl<T: TypePath> TypeBuilder<T> {
    /// Declares `B` as the base class of `T`, with projections onto the
    /// embedded base part.
    pub fn extends<B: TypePath>(
        mut self,
        as_base: fn(&T) -> &B,
        as_base_mut: fn(&mut T) -> &mut B,
    ) -> Self {
        self.info.base = Some(BaseLink {
            ty: Type::of::<B>(),
            upcast: Arc::new(Upcast {
                as_base,
                as_base_mut,
            }),
        });
        self
    }

    /// Registers [`Default::default`] as the zero-argument constructor.
    pub fn with_default(self) -> Self
    where
        T: Default,
    {
        self.default_with(T::default)
    }

    /// Registers a zero-argument constructor.
    pub fn default_with(mut self, f: impl Fn() -> T + Send + Sync + 'static) -> Self {
        self.info.default_factory = Some(Factory::new(f));
        self
    }

    /// Registers the parameter list of the type's parametrized constructor.
    ///
    /// The list is used when a raw positional factory is configured.
    pub fn constructor(mut self, params: impl IntoIterator<Item = ParamInfo>) -> Self {
        self.info.constructor = Some(params.into_iter().collect());
        self
    }
}

impl<T: TypePath + ?Sized> From<TypeBuilder<T>> for TypeInfo {
    #[inline]
    fn from(value: TypeBuilder<T>) -> Self {
        value.info
    }
}

// -----------------------------------------------------------------------------
// Tests
