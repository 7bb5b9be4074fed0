use alloc::sync::Arc;
use core::fmt;

use fj_reflect::info::Type;
use fj_reflect::registry::TypeRegistry;
use fj_utils::hash::HashMap;

use crate::BindError;

// -----------------------------------------------------------------------------
// SerializationBinder

/// Maps types to the names written in polymorphic documents, and back.
pub trait SerializationBinder: Send + Sync {
    /// Returns `(qualifier, name)` for `ty`.
    fn bind_to_name(&self, ty: &Type) -> (Option<&str>, &str);

    /// Resolves a name read from a document.
    fn bind_to_type(&self, qualifier: Option<&str>, name: &str) -> Result<Type, BindError>;
}

// -----------------------------------------------------------------------------
// DefaultSerializationBinder

/// Binds types by their full path, qualified with the crate name.
pub struct DefaultSerializationBinder {
    registry: Arc<TypeRegistry>,
}

impl DefaultSerializationBinder {
    #[inline]
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }
}

impl SerializationBinder for DefaultSerializationBinder {
    fn bind_to_name(&self, ty: &Type) -> (Option<&str>, &str) {
        (ty.crate_name(), ty.path())
    }

    fn bind_to_type(&self, qualifier: Option<&str>, name: &str) -> Result<Type, BindError> {
        let info = self
            .registry
            .get_with_path(name)
            .ok_or_else(|| BindError::UnknownTypeName { name: name.into() })?;

        match qualifier {
            Some(qualifier) if info.ty().crate_name() != Some(qualifier) => {
                Err(BindError::QualifierMismatch {
                    name: name.into(),
                    qualifier: qualifier.into(),
                })
            }
            _ => Ok(*info.ty()),
        }
    }
}

impl fmt::Debug for DefaultSerializationBinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultSerializationBinder").finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// AliasBinder

/// Consults declared contract names first, then a base binder.
///
/// An aliased type is written without qualifier, and an alias is accepted
/// whatever qualifier accompanies it.
pub struct AliasBinder {
    base: Arc<dyn SerializationBinder>,
    type_to_name: HashMap<Type, Arc<str>>,
    name_to_type: HashMap<Arc<str>, Type>,
}

impl AliasBinder {
    pub(crate) fn new(
        base: Arc<dyn SerializationBinder>,
        type_to_name: HashMap<Type, Arc<str>>,
        name_to_type: HashMap<Arc<str>, Type>,
    ) -> Self {
        Self {
            base,
            type_to_name,
            name_to_type,
        }
    }

    /// The contract name declared for `ty`.
    #[inline]
    pub fn alias_of(&self, ty: &Type) -> Option<&str> {
        self.type_to_name.get(ty).map(|name| &**name)
    }

    /// The type a contract name was declared for.
    #[inline]
    pub fn type_for(&self, alias: &str) -> Option<Type> {
        self.name_to_type.get(alias).copied()
    }
}

impl SerializationBinder for AliasBinder {
    fn bind_to_name(&self, ty: &Type) -> (Option<&str>, &str) {
        match self.alias_of(ty) {
            Some(alias) => (None, alias),
            None => self.base.bind_to_name(ty),
        }
    }

    fn bind_to_type(&self, qualifier: Option<&str>, name: &str) -> Result<Type, BindError> {
        match self.type_for(name) {
            Some(ty) => Ok(ty),
            None => self.base.bind_to_type(qualifier, name),
        }
    }
}

impl fmt::Debug for AliasBinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AliasBinder")
            .field("aliases", &self.type_to_name)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests
