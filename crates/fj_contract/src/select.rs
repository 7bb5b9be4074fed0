use alloc::sync::Arc;

use fj_reflect::info::{MemberId, Type};
use fj_reflect::registry::TypeRegistry;

use crate::ConfigError;

// -----------------------------------------------------------------------------
// MemberPath

/// A recorded chain of member accesses, starting at the configured instance.
///
/// Member selectors are closures over a `MemberPath`; `|m| m.get("Age")`
/// selects the member `Age` of the configured type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberPath {
    segments: Vec<Arc<str>>,
}

impl MemberPath {
    /// Accesses the member `name` of the current value.
    #[inline]
    pub fn get(mut self, name: &str) -> Self {
        self.segments.push(Arc::from(name));
        self
    }

    /// The accessed member names, outermost first.
    #[inline]
    pub fn segments(&self) -> &[Arc<str>] {
        &self.segments
    }
}

/// Turns a selector into the member of `ty` it designates.
///
/// The selector must access exactly one member, declared directly on `ty`.
pub(crate) fn resolve_member(
    registry: &TypeRegistry,
    ty: &Type,
    selector: impl FnOnce(MemberPath) -> MemberPath,
) -> Result<MemberId, ConfigError> {
    let path = selector(MemberPath::default());
    let name = match path.segments() {
        [] => return Err(ConfigError::NotMemberAccess),
        [name] => name,
        [.., last] => {
            return Err(ConfigError::ParameterNotMemberOwner {
                member: last.to_string(),
            });
        }
    };

    if let Some(member) = registry.declared_member(ty, name) {
        return Ok(member.id().clone());
    }

    match registry.find_member(ty, name) {
        Some(inherited) => Err(ConfigError::ReflectedTypeNotMemberOwner {
            reflected: ty.path(),
            declaring: inherited.declaring().path(),
            member: name.to_string(),
        }),
        None => Err(ConfigError::UnresolvedMember {
            ty: ty.path(),
            member: name.to_string(),
        }),
    }
}

// -----------------------------------------------------------------------------
// Tests
