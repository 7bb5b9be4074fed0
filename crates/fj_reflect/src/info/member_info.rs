use alloc::format;
use alloc::sync::Arc;
use core::fmt;
use core::marker::PhantomData;

use serde_core::Serialize;
use serde_core::de::DeserializeOwned;

use crate::access::{Getter, Setter};
use crate::info::{Type, TypePath};

// -----------------------------------------------------------------------------
// Kinds

/// Whether a member is a plain field or an accessor-backed property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Property,
}

/// Accessibility of a member, or of a property's setter.
///
/// `Private` members are not inherited by derived types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Private,
}

/// How a property takes part in virtual dispatch.
///
/// An [`Override`](Dispatch::Override) property shares the slot of the
/// nearest base property with the same name. Any other property starts a new
/// slot, hiding same-named base properties instead of overriding them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dispatch {
    #[default]
    Sealed,
    Virtual,
    Override,
}

// -----------------------------------------------------------------------------
// MemberId

/// Identity of a member: declaring type, name and kind.
///
/// Two ids are equal only if all three parts match.
///
/// # Examples
///
/// ```
/// use fj_reflect::info::{MemberId, TypePath};
///
/// struct Cat;
/// impl TypePath for Cat {}
///
/// let a = MemberId::property::<Cat>("Paws");
/// let b = MemberId::property::<Cat>("Paws");
/// assert_eq!(a, b);
/// assert_ne!(a, MemberId::field::<Cat>("Paws"));
/// assert_eq!(a.to_string(), "Cat.Paws");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MemberId {
    declaring: Type,
    name: Arc<str>,
    kind: MemberKind,
}

impl MemberId {
    /// Creates a member id.
    #[inline]
    pub fn new(declaring: Type, name: impl Into<Arc<str>>, kind: MemberKind) -> Self {
        Self {
            declaring,
            name: name.into(),
            kind,
        }
    }

    /// Shorthand for a property declared on `T`.
    #[inline]
    pub fn property<T: TypePath + ?Sized>(name: &str) -> Self {
        Self::new(Type::of::<T>(), name, MemberKind::Property)
    }

    /// Shorthand for a field declared on `T`.
    #[inline]
    pub fn field<T: TypePath + ?Sized>(name: &str) -> Self {
        Self::new(Type::of::<T>(), name, MemberKind::Field)
    }

    #[inline]
    pub fn declaring(&self) -> &Type {
        &self.declaring
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the shared name, cheap to clone.
    #[inline]
    pub fn name_arc(&self) -> &Arc<str> {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> MemberKind {
        self.kind
    }
}

impl fmt::Debug for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{} ({:?})", self.declaring.path(), self.name, self.kind)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring.name(), self.name)
    }
}

// -----------------------------------------------------------------------------
// MemberInfo

/// Description of one field or property declared on a type.
///
/// Built with [`MemberInfo::property`], [`MemberInfo::field`] or
/// [`MemberInfo::explicit`].
#[derive(Clone)]
pub struct MemberInfo {
    id: MemberId,
    visibility: Visibility,
    setter_visibility: Visibility,
    dispatch: Dispatch,
    can_read: bool,
    can_write: bool,
    getter: Option<Getter>,
    setter: Option<Setter>,
    implements: Option<MemberId>,
    value_type: &'static str,
}

impl MemberInfo {
    fn with_id<V>(id: MemberId, visibility: Visibility) -> Self {
        Self {
            id,
            visibility,
            setter_visibility: visibility,
            dispatch: Dispatch::Sealed,
            can_read: false,
            can_write: false,
            getter: None,
            setter: None,
            implements: None,
            value_type: core::any::type_name::<V>(),
        }
    }

    /// Starts describing a public property `name` of type `V` on `O`.
    ///
    /// `O` may be an interface (`dyn Trait`), whose properties carry no
    /// accessors and are marked with [`readable`](MemberBuilder::readable)
    /// and [`writable`](MemberBuilder::writable) instead.
    pub fn property<O: TypePath + ?Sized, V: 'static>(name: &str) -> MemberBuilder<O, V> {
        MemberBuilder::new(Self::with_id::<V>(
            MemberId::property::<O>(name),
            Visibility::Public,
        ))
    }

    /// Starts describing a public field `name` of type `V` on `O`.
    pub fn field<O: TypePath + ?Sized, V: 'static>(name: &str) -> MemberBuilder<O, V> {
        MemberBuilder::new(Self::with_id::<V>(
            MemberId::field::<O>(name),
            Visibility::Public,
        ))
    }

    /// Starts describing an explicit implementation of the property `name`
    /// of interface `I` on `O`.
    ///
    /// The member is private, named `"<I>.<name>"`, and only reachable
    /// through the interface.
    ///
    /// # Examples
    ///
    /// ```
    /// use fj_reflect::info::{MemberInfo, MemberId, TypePath, Visibility};
    ///
    /// trait Shape {}
    /// impl TypePath for dyn Shape {}
    ///
    /// #[derive(Default)]
    /// struct Square { side: i32 }
    /// impl TypePath for Square {}
    ///
    /// let member = MemberInfo::explicit::<Square, dyn Shape, i32>("Side")
    ///     .getter(|s| s.side)
    ///     .build();
    ///
    /// assert_eq!(member.name(), "Shape.Side");
    /// assert_eq!(member.visibility(), Visibility::Private);
    /// assert_eq!(member.implements(), Some(&MemberId::property::<dyn Shape>("Side")));
    /// ```
    pub fn explicit<O: TypePath + ?Sized, I: TypePath + ?Sized, V: 'static>(
        name: &str,
    ) -> MemberBuilder<O, V> {
        let qualified = format!("{}.{}", I::type_name(), name);
        let mut info = Self::with_id::<V>(
            MemberId::property::<O>(&qualified),
            Visibility::Private,
        );
        info.implements = Some(MemberId::property::<I>(name));
        MemberBuilder::new(info)
    }

    #[inline]
    pub fn id(&self) -> &MemberId {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.id.name()
    }

    #[inline]
    pub fn kind(&self) -> MemberKind {
        self.id.kind()
    }

    #[inline]
    pub fn declaring(&self) -> &Type {
        self.id.declaring()
    }

    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub fn setter_visibility(&self) -> Visibility {
        self.setter_visibility
    }

    #[inline]
    pub fn dispatch(&self) -> Dispatch {
        self.dispatch
    }

    /// Whether the member has a getter of any visibility.
    #[inline]
    pub fn can_read(&self) -> bool {
        self.can_read
    }

    /// Whether the member has a setter of any visibility.
    #[inline]
    pub fn can_write(&self) -> bool {
        self.can_write
    }

    #[inline]
    pub fn getter(&self) -> Option<&Getter> {
        self.getter.as_ref()
    }

    #[inline]
    pub fn setter(&self) -> Option<&Setter> {
        self.setter.as_ref()
    }

    /// The interface member this member explicitly implements, if any.
    #[inline]
    pub fn implements(&self) -> Option<&MemberId> {
        self.implements.as_ref()
    }

    /// Name of the value type, as reported by [`core::any::type_name`].
    #[inline]
    pub fn value_type_name(&self) -> &'static str {
        self.value_type
    }
}

impl fmt::Debug for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberInfo")
            .field("id", &self.id)
            .field("visibility", &self.visibility)
            .field("dispatch", &self.dispatch)
            .field("can_read", &self.can_read)
            .field("can_write", &self.can_write)
            .field("implements", &self.implements)
            .field("value_type", &self.value_type)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// MemberBuilder

/// Typed builder for [`MemberInfo`].
pub struct MemberBuilder<O: ?Sized, V> {
    info: MemberInfo,
    _marker: PhantomData<fn(&O) -> V>,
}

impl<O: TypePath + ?Sized, V: 'static> MemberBuilder<O, V> {
    #[inline]
    fn new(info: MemberInfo) -> Self {
        Self {
            info,
            _marker: PhantomData,
        }
    }

    /// Marks the member as readable without providing an accessor.
    pub fn readable(mut self) -> Self {
        self.info.can_read = true;
        self
    }

    /// Marks the member as writable without providing an accessor.
    pub fn writable(mut self) -> Self {
        self.info.can_write = true;
        self
    }

    /// Makes the member, and its setter, internal.
    pub fn internal(mut self) -> Self {
        self.info.visibility = Visibility::Internal;
        self.info.setter_visibility = Visibility::Internal;
        self
    }

    /// Makes only the setter private.
    pub fn private_setter(mut self) -> Self {
        self.info.setter_visibility = Visibility::Private;
        self
    }

    /// Opens a new virtual slot.
    pub fn as_virtual(mut self) -> Self {
        self.info.dispatch = Dispatch::Virtual;
        self
    }

    /// Overrides the virtual slot of the nearest same-named base property.
    pub fn as_override(mut self) -> Self {
        self.info.dispatch = Dispatch::Override;
        self
    }

    /// Finishes the description.
    #[inline]
    pub fn build(self) -> MemberInfo {
        self.info
    }
}

impl<O: TypePath, V: Serialize + 'static> MemberBuilder<O, V> {
    /// Attaches a read accessor.
    pub fn getter(mut self, f: impl Fn(&O) -> V + Send + Sync + 'static) -> Self {
        self.info.getter = Some(Getter::new(f));
        self.info.can_read = true;
        self
    }
}

impl<O: TypePath, V: DeserializeOwned + 'static> MemberBuilder<O, V> {
    /// Attaches a write accessor.
    pub fn setter(mut self, f: impl Fn(&mut O, V) + Send + Sync + 'static) -> Self {
        self.info.setter = Some(Setter::new(f));
        self.info.can_write = true;
        self
    }
}

impl<O: TypePath + ?Sized, V: 'static> From<MemberBuilder<O, V>> for MemberInfo {
    #[inline]
    fn from(value: MemberBuilder<O, V>) -> Self {
        value.info
    }
}

// -----------------------------------------------------------------------------
// Tests
