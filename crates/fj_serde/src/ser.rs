use core::any::Any;

use fj_contract::{ContractResolver, Required};
use fj_reflect::info::Type;
use serde_json::{Map, Value};

use crate::{Error, JsonSerializer, TypeNameHandling};

// -----------------------------------------------------------------------------
// Writing

impl JsonSerializer {
    /// Writes `value` as a JSON object.
    ///
    /// The declared type is the runtime type, so [`TypeNameHandling::Auto`]
    /// writes no discriminator.
    pub fn to_value(&self, value: &dyn Any) -> Result<Value, Error> {
        let runtime = self.configuration.registry().type_of(value)?;
        self.write_object(value, &runtime, &runtime)
    }

    /// Writes `value` where a `declared` value is expected.
    pub fn to_value_as(&self, value: &dyn Any, declared: &Type) -> Result<Value, Error> {
        let runtime = self.configuration.registry().type_of(value)?;
        if !self.configuration.registry().is_assignable_from(declared, &runtime) {
            return Err(Error::IncompatibleType {
                expected: declared.path(),
                actual: runtime.path(),
            });
        }
        self.write_object(value, &runtime, declared)
    }

    /// Writes a sequence of values declared as `declared` into a JSON array.
    pub fn to_seq<'a>(
        &self,
        values: impl IntoIterator<Item = &'a dyn Any>,
        declared: &Type,
    ) -> Result<Value, Error> {
        values
            .into_iter()
            .map(|value| self.to_value_as(value, declared))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    /// Writes `value` as compact JSON text.
    pub fn to_string(&self, value: &dyn Any) -> Result<String, Error> {
        let value = self.to_value(value)?;
        Ok(serde_json::to_string(&value)?)
    }

    fn writes_type_name(&self, runtime: &Type, declared: &Type) -> bool {
        match self.settings.type_name_handling {
            TypeNameHandling::None => false,
            TypeNameHandling::Objects => true,
            TypeNameHandling::Auto => runtime != declared,
        }
    }

    fn write_object(&self, value: &dyn Any, runtime: &Type, declared: &Type) -> Result<Value, Error> {
        let contract = self.configuration.resolve_contract(runtime)?;
        let mut object = Map::new();

        if self.writes_type_name(runtime, declared) {
            object.insert(
                self.settings.type_property.to_string(),
                Value::String(self.type_name(runtime)),
            );
        }

        for property in contract.properties() {
            if !property.is_readable() {
                continue;
            }
            if !property.should_serialize(value) {
                log::trace!("condition skips `{}` of `{runtime}`", property.name());
                continue;
            }

            let field = property.get_value(value).map_err(|source| Error::Property {
                ty: runtime.path(),
                name: property.name().to_string(),
                source,
            })?;
            let field = serde_json::to_value(&*field)?;

            if field.is_null() && property.required() != Required::Default {
                return Err(Error::NullNotAllowed {
                    ty: runtime.path(),
                    name: property.name().to_string(),
                });
            }
            object.insert(property.name().to_string(), field);
        }

        Ok(Value::Object(object))
    }
}

// -----------------------------------------------------------------------------
// Tests
