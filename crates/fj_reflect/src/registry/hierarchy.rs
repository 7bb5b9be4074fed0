use alloc::vec::Vec;

use crate::info::{Dispatch, MemberId, MemberInfo, MemberKind, Type, TypeInfo, Visibility};
use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// Lineage

/// Iterator over a type and its registered base classes, most derived first.
///
/// Created by [`TypeRegistry::lineage`] and [`TypeRegistry::ancestors`].
pub struct Lineage<'a> {
    registry: &'a TypeRegistry,
    next: Option<&'a TypeInfo>,
}

impl<'a> Iterator for Lineage<'a> {
    type Item = &'a TypeInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current
            .base()
            .and_then(|link| self.registry.get(&link.ty().id()));
        Some(current)
    }
}

// -----------------------------------------------------------------------------
// Hierarchy queries

impl TypeRegistry {
    /// Iterates `ty` followed by its base classes.
    ///
    /// Stops at the first unregistered type.
    #[inline]
    pub fn lineage(&self, ty: &Type) -> Lineage<'_> {
        Lineage {
            registry: self,
            next: self.get(&ty.id()),
        }
    }

    /// Iterates the base classes of `ty`, nearest first.
    #[inline]
    pub fn ancestors(&self, ty: &Type) -> core::iter::Skip<Lineage<'_>> {
        self.lineage(ty).skip(1)
    }

    /// All interfaces implemented by `ty`, including those inherited from
    /// base classes and those extended by other interfaces.
    ///
    /// Interfaces listed closer to `ty` come first; there are no duplicates.
    /// For an interface, the result holds the interfaces it extends.
    pub fn interfaces_of(&self, ty: &Type) -> Vec<Type> {
        let mut found: Vec<Type> = Vec::new();
        let mut pending: Vec<Type> = Vec::new();

        for info in self.lineage(ty) {
            pending.extend(info.interfaces().iter().rev().copied());
            while let Some(iface) = pending.pop() {
                if found.contains(&iface) {
                    continue;
                }
                found.push(iface);
                if let Some(iface_info) = self.get(&iface.id()) {
                    pending.extend(iface_info.interfaces().iter().rev().copied());
                }
            }
        }
        found
    }

    /// Whether a value of type `source` can be used where `target` is
    /// expected: same type, a base class, or an implemented interface.
    pub fn is_assignable_from(&self, target: &Type, source: &Type) -> bool {
        if target == source {
            return true;
        }
        if self.ancestors(source).any(|t| t.ty() == target) {
            return true;
        }
        self.get(&target.id()).is_some_and(TypeInfo::is_interface)
            && self.interfaces_of(source).contains(target)
    }

    /// Whether one of the types is assignable from the other.
    #[inline]
    pub fn are_related(&self, a: &Type, b: &Type) -> bool {
        self.is_assignable_from(a, b) || self.is_assignable_from(b, a)
    }

    /// Returns the description of a member.
    #[inline]
    pub fn member(&self, id: &MemberId) -> Option<&MemberInfo> {
        self.get(&id.declaring().id())?.member_by_id(id)
    }

    /// Returns a member of any kind declared directly on `ty`.
    pub fn declared_member(&self, ty: &Type, name: &str) -> Option<&MemberInfo> {
        self.get(&ty.id())?
            .members()
            .iter()
            .find(|m| m.name() == name)
    }

    /// Returns the first member of any kind named `name` visible from `ty`,
    /// searching from `ty` towards its bases.
    pub fn find_member(&self, ty: &Type, name: &str) -> Option<&MemberInfo> {
        self.lineage(ty).enumerate().find_map(|(depth, info)| {
            info.members()
                .iter()
                .find(|m| m.name() == name && (depth == 0 || m.visibility() != Visibility::Private))
        })
    }

    /// The member that opened the virtual slot `id` belongs to.
    ///
    /// Fields and non-overriding properties are their own base definition.
    pub fn base_definition(&self, id: &MemberId) -> MemberId {
        let mut current = id.clone();
        loop {
            let Some(info) = self.member(&current) else {
                return current;
            };
            if info.kind() != MemberKind::Property || info.dispatch() != Dispatch::Override {
                return current;
            }
            let overridden = self
                .ancestors(current.declaring())
                .find_map(|t| t.member(current.name(), MemberKind::Property))
                .map(|m| m.id().clone());
            match overridden {
                Some(base) => current = base,
                None => return current,
            }
        }
    }

    /// Whether two members occupy the same virtual slot.
    pub fn is_same_slot(&self, a: &MemberId, b: &MemberId) -> bool {
        a.kind() == b.kind()
            && a.name() == b.name()
            && (a == b || self.base_definition(a) == self.base_definition(b))
    }

    /// Every member visible from `ty`, base classes first.
    ///
    /// Includes members declared on `ty` of any visibility and inherited
    /// members that are not private. A base property overridden further down
    /// is replaced by its most derived override; a hidden base property
    /// stays, next to the member hiding it.
    pub fn visible_members(&self, ty: &Type) -> Vec<&MemberInfo> {
        let mut levels: Vec<Vec<&MemberInfo>> = Vec::new();
        let mut seen_overrides: Vec<MemberId> = Vec::new();

        for (depth, info) in self.lineage(ty).enumerate() {
            let mut level = Vec::new();
            for member in info.members() {
                if depth > 0 && member.visibility() == Visibility::Private {
                    continue;
                }
                if member.kind() == MemberKind::Property {
                    let slot = self.base_definition(member.id());
                    if seen_overrides.contains(&slot) {
                        continue;
                    }
                    if member.dispatch() == Dispatch::Override {
                        seen_overrides.push(slot);
                    }
                }
                level.push(member);
            }
            levels.push(level);
        }

        levels.into_iter().rev().flatten().collect()
    }

    /// Members serialized without any configuration: public fields and
    /// public readable properties visible from `ty`, base classes first.
    pub fn default_members(&self, ty: &Type) -> Vec<&MemberInfo> {
        self.visible_members(ty)
            .into_iter()
            .filter(|m| m.visibility() == Visibility::Public)
            .filter(|m| m.kind() == MemberKind::Field || m.can_read())
            .collect()
    }

    /// The member of `concrete` implementing the interface member `member`.
    ///
    /// Explicit implementations win. Otherwise the implementation is the
    /// public property of the same name seen from the nearest class listing
    /// the interface, replaced by its most derived override in `concrete`.
    pub fn implementation_of(&self, concrete: &Type, member: &MemberId) -> Option<MemberId> {
        let iface = member.declaring();

        for info in self.lineage(concrete) {
            if let Some(explicit) = info
                .members()
                .iter()
                .find(|m| m.implements() == Some(member))
            {
                return Some(explicit.id().clone());
            }
        }

        let declarer = self.lineage(concrete).find(|info| {
            info.interfaces()
                .iter()
                .any(|i| i == iface || self.interfaces_of(i).contains(iface))
        })?;

        let implicit = self.lineage(declarer.ty()).find_map(|info| {
            info.members().iter().find(|m| {
                m.kind() == MemberKind::Property
                    && m.name() == member.name()
                    && m.visibility() == Visibility::Public
            })
        })?;

        let slot = self.base_definition(implicit.id());
        for info in self.lineage(concrete) {
            if info.ty() == implicit.declaring() {
                break;
            }
            if let Some(over) = info.member(member.name(), MemberKind::Property)
                && over.dispatch() == Dispatch::Override
                && self.base_definition(over.id()) == slot
            {
                return Some(over.id().clone());
            }
        }
        Some(implicit.id().clone())
    }

    /// Pairs each property of `iface` with its implementation in `concrete`.
    ///
    /// Empty when `concrete` does not implement `iface`.
    pub fn interface_map(&self, concrete: &Type, iface: &Type) -> Vec<(MemberId, MemberId)> {
        let Some(iface_info) = self.get(&iface.id()) else {
            return Vec::new();
        };
        if !self.interfaces_of(concrete).contains(iface) {
            return Vec::new();
        }
        iface_info
            .members()
            .iter()
            .filter(|m| m.kind() == MemberKind::Property)
            .filter_map(|m| {
                self.implementation_of(concrete, m.id())
                    .map(|target| (m.id().clone(), target))
            })
            .collect()
    }
}
