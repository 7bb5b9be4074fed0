use core::any::{Any, TypeId};

// -----------------------------------------------------------------------------
// TypePath

/// A static accessor to type paths and names.
///
/// Every method has a default derived from [`core::any::type_name`], so
/// `impl TypePath for Foo {}` is enough for most types. The compiler output
/// is not guaranteed to be stable across versions; override
/// [`type_path`](TypePath::type_path) (and the other methods) when the names
/// end up in persisted documents, e.g. through a type discriminator.
///
/// These names never carry a `::` prefix, and trait objects drop their `dyn `
/// prefix: the path of `dyn my_crate::Shape` is parsed as `my_crate::Shape`.
///
/// # Examples
///
/// ```
/// use fj_reflect::info::TypePath;
///
/// struct Derived;
/// impl TypePath for Derived {}
///
/// struct Pinned;
/// impl TypePath for Pinned {
///     fn type_path() -> &'static str { "zoo::Pinned" }
///     fn type_name() -> &'static str { "Pinned" }
///     fn type_ident() -> &'static str { "Pinned" }
///     fn module_path() -> Option<&'static str> { Some("zoo") }
/// }
///
/// assert_eq!(Derived::type_name(), "Derived");
/// assert_eq!(Pinned::type_path(), "zoo::Pinned");
/// ```
pub trait TypePath: 'static {
    /// Returns the fully qualified path with generics of the target type.
    ///
    /// This is the unique identifier of a type and must not be shared by
    /// two types.
    fn type_path() -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Returns the path without its module prefix.
    fn type_name() -> &'static str {
        parse::type_name(Self::type_path())
    }

    /// Returns the short name of the type, without generics.
    fn type_ident() -> &'static str {
        parse::type_ident(Self::type_path())
    }

    /// Optional module path where the type is defined.
    fn module_path() -> Option<&'static str> {
        parse::module_path(Self::type_path())
    }
}

mod parse {
    #[inline]
    fn strip_dyn(path: &'static str) -> &'static str {
        path.strip_prefix("dyn ").unwrap_or(path)
    }

    #[inline]
    fn head_len(path: &str) -> usize {
        path.find('<').unwrap_or(path.len())
    }

    pub(super) fn module_path(path: &'static str) -> Option<&'static str> {
        let path = strip_dyn(path);
        let head = &path[..head_len(path)];
        head.rfind("::").map(|index| &path[..index])
    }

    pub(super) fn type_name(path: &'static str) -> &'static str {
        let path = strip_dyn(path);
        match path[..head_len(path)].rfind("::") {
            Some(index) => &path[index + 2..],
            None => path,
        }
    }

    pub(super) fn type_ident(path: &'static str) -> &'static str {
        let name = type_name(path);
        &name[..head_len(name)]
    }
}

// -----------------------------------------------------------------------------
// TypePathTable

/// Lightweight vtable providing dynamic access to [`TypePath`] APIs.
///
/// It also parses [`crate_name`](TypePathTable::crate_name) from the
/// module path.
#[derive(Clone, Copy)]
pub struct TypePathTable {
    type_path: fn() -> &'static str,
    type_name: fn() -> &'static str,
    type_ident: fn() -> &'static str,
    module_path: fn() -> Option<&'static str>,
}

impl TypePathTable {
    /// Creates a new table from a type.
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            type_path: T::type_path,
            type_name: T::type_name,
            type_ident: T::type_ident,
            module_path: T::module_path,
        }
    }

    /// See [`TypePath::type_path`]
    #[inline(always)]
    pub fn path(&self) -> &'static str {
        (self.type_path)()
    }

    /// See [`TypePath::type_name`]
    #[inline(always)]
    pub fn name(&self) -> &'static str {
        (self.type_name)()
    }

    /// See [`TypePath::type_ident`]
    #[inline(always)]
    pub fn ident(&self) -> &'static str {
        (self.type_ident)()
    }

    /// See [`TypePath::module_path`]
    #[inline(always)]
    pub fn module_path(&self) -> Option<&'static str> {
        (self.module_path)()
    }

    /// Parse `crate_name` from `module_path`.
    #[inline]
    pub fn crate_name(&self) -> Option<&'static str> {
        let s = (self.module_path)()?;
        match s.find(':') {
            Some(index) => Some(&s[..index]),
            None => Some(s),
        }
    }
}

impl core::fmt::Debug for TypePathTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypePathTable")
            .field("type_path", &self.path())
            .field("type_name", &self.name())
            .field("module_path", &self.module_path())
            .field("crate_name", &self.crate_name())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Type

/// The runtime handle of a described type.
///
/// Includes a [`TypeId`] and a [`TypePathTable`]. Equality and hashing only
/// look at the [`TypeId`].
///
/// # Examples
///
/// ```
/// use fj_reflect::info::{Type, TypePath};
///
/// struct Cat;
/// impl TypePath for Cat {}
///
/// let ty = Type::of::<Cat>();
/// assert!(ty.is::<Cat>());
/// assert_eq!(ty.name(), "Cat");
/// ```
#[derive(Copy, Clone)]
pub struct Type {
    type_path_table: TypePathTable,
    type_id: TypeId,
}

impl Type {
    /// Creates a new [`Type`] from a type that implements [`TypePath`].
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            type_path_table: TypePathTable::of::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }

    /// Returns the [`TypeId`] of the type.
    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.type_id
    }

    /// Check if the given type matches this one.
    #[inline(always)]
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        TypeId::of::<T>() == self.type_id
    }

    /// Returns the [`TypePathTable`] of the type.
    #[inline(always)]
    pub const fn path_table(&self) -> TypePathTable {
        self.type_path_table
    }

    /// See [`TypePath::type_path`].
    #[inline]
    pub fn path(&self) -> &'static str {
        self.type_path_table.path()
    }

    /// See [`TypePath::type_name`].
    #[inline]
    pub fn name(&self) -> &'static str {
        self.type_path_table.name()
    }

    /// See [`TypePath::type_ident`].
    #[inline]
    pub fn ident(&self) -> &'static str {
        self.type_path_table.ident()
    }

    /// See [`TypePath::module_path`].
    #[inline]
    pub fn module_path(&self) -> Option<&'static str> {
        self.type_path_table.module_path()
    }

    /// Parse `crate_name` from `module_path`.
    #[inline]
    pub fn crate_name(&self) -> Option<&'static str> {
        self.type_path_table.crate_name()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Type {}

impl core::hash::Hash for Type {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

/// Only outputs the [`TypePath`] of the type.
impl core::fmt::Debug for Type {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}

impl core::fmt::Display for Type {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}

// -----------------------------------------------------------------------------
// Tests
