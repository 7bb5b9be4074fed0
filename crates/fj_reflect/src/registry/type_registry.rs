use core::any::TypeId;

use fj_utils::TypeIdMap;
use fj_utils::hash::{HashMap, HashSet};

use crate::info::{Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// TypeRegistry

/// The central store of type descriptions.
///
/// [Registering] a type stores its [`TypeInfo`] and indexes it by path and
/// by short name. Short names shared by several types become ambiguous and
/// are only reachable through their full path.
///
/// Beyond storage, the registry answers the hierarchy questions contract
/// resolution needs: ancestors, implemented interfaces, visible members,
/// virtual slots and interface maps. See the `impl` blocks in this module.
///
/// # Examples
///
/// ```
/// use fj_reflect::info::{TypeInfo, TypePath, Typed};
/// use fj_reflect::registry::TypeRegistry;
///
/// struct Cat;
/// impl TypePath for Cat {}
/// impl Typed for Cat {
///     fn type_info() -> TypeInfo {
///         TypeInfo::class::<Self>().build()
///     }
/// }
///
/// let mut registry = TypeRegistry::new();
/// assert!(registry.register::<Cat>());
/// assert!(!registry.register::<Cat>());
///
/// let path = registry.get_type::<Cat>().unwrap().type_path();
/// assert!(registry.get_with_path(path).is_some());
/// assert!(registry.get_with_type_name("Cat").is_some());
/// ```
///
/// [Registering]: TypeRegistry::register
pub struct TypeRegistry {
    type_info_table: TypeIdMap<TypeInfo>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            type_info_table: TypeIdMap::new(),
            type_path_to_id: HashMap::with_hasher(fj_utils::hash::FixedHashState),
            type_name_to_id: HashMap::with_hasher(fj_utils::hash::FixedHashState),
            ambiguous_names: HashSet::with_hasher(fj_utils::hash::FixedHashState),
        }
    }

    // # Validity
    // The type must **not** already exist.
    fn add_new_type_indices(
        ty: &Type,
        type_path_to_id: &mut HashMap<&'static str, TypeId>,
        type_name_to_id: &mut HashMap<&'static str, TypeId>,
        ambiguous_names: &mut HashSet<&'static str>,
    ) {
        let type_name = ty.name();

        if !ambiguous_names.contains(type_name) {
            if type_name_to_id.contains_key(type_name) {
                type_name_to_id.remove(type_name);
                ambiguous_names.insert(type_name);
            } else {
                type_name_to_id.insert(type_name, ty.id());
            }
        }

        type_path_to_id.insert(ty.path(), ty.id());
    }

    /// Registers `T` if it is not registered yet.
    ///
    /// Returns `false`, leaving the registry unchanged, if `T` was already
    /// registered.
    #[inline]
    pub fn register<T: Typed + ?Sized>(&mut self) -> bool {
        if self.type_info_table.contains(&TypeId::of::<T>()) {
            return false;
        }
        self.register_info(T::type_info())
    }

    /// Registers a prepared description if its type is not registered yet.
    pub fn register_info(&mut self, info: impl Into<TypeInfo>) -> bool {
        let info = info.into();
        let ty = *info.ty();
        self.type_info_table.try_insert(ty.id(), || {
            Self::add_new_type_indices(
                &ty,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
            info
        })
    }

    /// Returns `true` if the type is registered.
    #[inline]
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.type_info_table.contains(type_id)
    }

    /// Returns the description of a type.
    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&TypeInfo> {
        self.type_info_table.get(type_id)
    }

    /// Returns the description of `T`.
    #[inline]
    pub fn get_type<T: ?Sized + 'static>(&self) -> Option<&TypeInfo> {
        self.type_info_table.get_type::<T>()
    }

    /// Looks a type up by its full [`type_path`](crate::info::TypePath::type_path).
    pub fn get_with_path(&self, type_path: &str) -> Option<&TypeInfo> {
        let id = self.type_path_to_id.get(type_path)?;
        self.get(id)
    }

    /// Looks a type up by its short name.
    ///
    /// Returns `None` when the name is ambiguous.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&TypeInfo> {
        let id = self.type_name_to_id.get(type_name)?;
        self.get(id)
    }

    /// Returns `true` if several registered types share the short name.
    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// Number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.type_info_table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.type_info_table.is_empty()
    }

    /// An iterator over all descriptions, in arbitrary order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeInfo> {
        self.type_info_table.values()
    }
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter().map(TypeInfo::ty)).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::TypePath;

    mod a {
        pub struct Shared;
    }
    mod b {
        pub struct Shared;
    }

    impl TypePath for a::Shared {}
    impl TypePath for b::Shared {}
    impl Typed for a::Shared {
        fn type_info() -> TypeInfo {
            TypeInfo::class::<Self>().build()
        }
    }
    impl Typed for b::Shared {
        fn type_info() -> TypeInfo {
            TypeInfo::class::<Self>().build()
        }
    }

    #[test]
    fn ambiguous_short_names() {
        let mut registry = TypeRegistry::new();
        registry.register::<a::Shared>();
        assert!(registry.get_with_type_name("Shared").is_some());

        registry.register::<b::Shared>();
        assert!(registry.get_with_type_name("Shared").is_none());
        assert!(registry.is_ambiguous("Shared"));

        let path = <b::Shared as TypePath>::type_path();
        assert!(registry.get_with_path(path).is_some_and(|t| t.ty().is::<b::Shared>()));
        assert_eq!(registry.len(), 2);
    }
}
