use core::fmt;

use fj_contract::{Configuration, SerializationBinder};
use fj_reflect::info::Type;
use serde_json::{Map, Value};

use crate::{JsonSettings, TypeNameHandling};

// -----------------------------------------------------------------------------
// JsonSerializer

/// Reads and writes JSON documents under a [`Configuration`].
///
/// Writing goes through [`to_value`](Self::to_value) and its variants,
/// reading through [`from_value`](Self::from_value) and its variants.
///
/// The serializer keeps no state between calls and can be shared.
#[derive(Clone)]
pub struct JsonSerializer {
    pub(crate) configuration: Configuration,
    pub(crate) settings: JsonSettings,
}

impl JsonSerializer {
    /// Creates a serializer with default settings.
    #[inline]
    pub fn new(configuration: &Configuration) -> Self {
        Self::with_settings(configuration, JsonSettings::default())
    }

    #[inline]
    pub fn with_settings(configuration: &Configuration, settings: JsonSettings) -> Self {
        Self {
            configuration: configuration.clone(),
            settings,
        }
    }

    #[inline]
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    #[inline]
    pub fn settings(&self) -> &JsonSettings {
        &self.settings
    }

    /// The discriminator written for `ty`.
    pub fn type_name(&self, ty: &Type) -> String {
        match self.configuration.bind_to_name(ty) {
            (Some(qualifier), name) => format!("{name}, {qualifier}"),
            (None, name) => String::from(name),
        }
    }

    #[inline]
    pub(crate) fn reads_type_names(&self) -> bool {
        self.settings.type_name_handling != TypeNameHandling::None
    }
}

impl fmt::Debug for JsonSerializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSerializer")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Splits a discriminator into its name and optional qualifier.
pub(crate) fn split_type_name(value: &str) -> (&str, Option<&str>) {
    match value.split_once(',') {
        Some((name, qualifier)) => (name.trim(), Some(qualifier.trim())),
        None => (value.trim(), None),
    }
}

/// The key of `map` matching `name`, exactly or ignoring ASCII case.
pub(crate) fn find_key<'m>(map: &'m Map<String, Value>, name: &str) -> Option<&'m str> {
    if let Some((key, _)) = map.get_key_value(name) {
        return Some(key);
    }
    map.keys().find(|key| key.eq_ignore_ascii_case(name)).map(String::as_str)
}

// -----------------------------------------------------------------------------
// Tests
