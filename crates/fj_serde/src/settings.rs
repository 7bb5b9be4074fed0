use alloc::borrow::Cow;

// -----------------------------------------------------------------------------
// TypeNameHandling

/// When the type discriminator is written.
///
/// Discriminators found in a document are honored unless this is
/// [`None`](Self::None).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeNameHandling {
    /// Never written, and ignored on read.
    #[default]
    None,
    /// Written for every object.
    Objects,
    /// Written when the runtime type differs from the declared one.
    Auto,
}

// -----------------------------------------------------------------------------
// JsonSettings

/// Settings of a [`JsonSerializer`](crate::JsonSerializer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSettings {
    pub type_name_handling: TypeNameHandling,
    /// Name of the discriminator member, `"$type"` by default.
    pub type_property: Cow<'static, str>,
}

impl Default for JsonSettings {
    fn default() -> Self {
        Self {
            type_name_handling: TypeNameHandling::None,
            type_property: Cow::Borrowed("$type"),
        }
    }
}

impl JsonSettings {
    #[inline]
    pub fn with_type_name_handling(mut self, handling: TypeNameHandling) -> Self {
        self.type_name_handling = handling;
        self
    }

    #[inline]
    pub fn with_type_property(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.type_property = name.into();
        self
    }
}
