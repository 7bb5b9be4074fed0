use fj_reflect::info::{MemberId, MemberKind, Type};
use fj_reflect::registry::TypeRegistry;

use crate::store::TypeTable;

// -----------------------------------------------------------------------------
// ResolutionWalk

fn entry_under<'t, E>(
    table: &'t TypeTable<E>,
    ty: &Type,
    accept: impl Fn(&MemberId) -> bool,
) -> Option<(&'t MemberId, &'t E)> {
    table
        .get(ty)?
        .iter()
        .find(|(id, _)| accept(id))
        .map(|(id, entry)| (id, entry))
}

/// Finds the entry of a per-type table that applies to a member.
///
/// A member `M` declared on `D` resolves, in order, to:
///
/// 1. the entry for `M` itself under `D`;
/// 2. for properties, the first entry found walking up `D`'s base classes
///    with the same name and the same virtual slot;
/// 3. for properties, the entry of an interface member that `M` implements,
///    following the interfaces of `D`.
///
/// A property hiding a base property opens a new slot, so step 2 never
/// reaches the configuration of the hidden member.
pub(crate) struct ResolutionWalk<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> ResolutionWalk<'r> {
    #[inline]
    pub(crate) fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    /// Returns the applying entry and the member it was declared for.
    pub(crate) fn find<'t, E>(
        &self,
        table: &'t TypeTable<E>,
        member: &MemberId,
    ) -> Option<(&'t MemberId, &'t E)> {
        if let Some(hit) = entry_under(table, member.declaring(), |id| id == member) {
            return Some(hit);
        }

        if member.kind() != MemberKind::Property {
            return None;
        }

        let slot = self.registry.base_definition(member);
        for ancestor in self.registry.ancestors(member.declaring()) {
            let same_slot = |id: &MemberId| {
                id.kind() == MemberKind::Property
                    && id.name() == member.name()
                    && self.registry.base_definition(id) == slot
            };
            if let Some(hit) = entry_under(table, ancestor.ty(), same_slot) {
                log::trace!("`{member}` resolved through base member `{}`", hit.0);
                return Some(hit);
            }
        }

        for iface in self.registry.interfaces_of(member.declaring()) {
            if !table.contains_key(&iface) {
                continue;
            }
            for (iface_member, target) in self.registry.interface_map(member.declaring(), &iface) {
                if &target != member {
                    continue;
                }
                if let Some(hit) = entry_under(table, &iface, |id| *id == iface_member) {
                    log::trace!("`{member}` resolved through interface member `{}`", hit.0);
                    return Some(hit);
                }
            }
        }

        None
    }

    /// Whether any entry applies to `member`.
    #[inline]
    pub(crate) fn contains<E>(&self, table: &TypeTable<E>, member: &MemberId) -> bool {
        self.find(table, member).is_some()
    }
}

// -----------------------------------------------------------------------------
// Tests
