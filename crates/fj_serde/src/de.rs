use core::any::Any;

use fj_contract::{Contract, ContractResolver, CreatorArgs, Required, SerializationBinder};
use fj_reflect::info::{Type, TypePath};
use serde_json::{Map, Value};

use crate::serializer::{find_key, split_type_name};
use crate::{Error, JsonSerializer};

type Object = Map<String, Value>;

// -----------------------------------------------------------------------------
// Reading

impl JsonSerializer {
    /// Reads a `T` from a JSON object.
    ///
    /// A discriminator may name `T` itself, nothing else: use
    /// [`from_value_dyn`](Self::from_value_dyn) to read derived types.
    pub fn from_value<T: TypePath>(&self, value: Value) -> Result<T, Error> {
        let declared = Type::of::<T>();
        self.from_value_dyn(&declared, value)?
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| Error::TypeMismatch {
                expected: declared.path(),
            })
    }

    /// Reads an instance of `declared`, or of the type named by the
    /// discriminator.
    pub fn from_value_dyn(&self, declared: &Type, value: Value) -> Result<Box<dyn Any>, Error> {
        let Value::Object(mut object) = value else {
            return Err(Error::ExpectedObject { ty: declared.path() });
        };
        let ty = self.read_type(declared, &mut object)?;
        self.read_object(&ty, object)
    }

    /// Reads a JSON array of `declared` instances.
    pub fn from_seq(&self, declared: &Type, value: Value) -> Result<Vec<Box<dyn Any>>, Error> {
        let Value::Array(items) = value else {
            return Err(Error::ExpectedArray { ty: declared.path() });
        };
        items
            .into_iter()
            .map(|item| self.from_value_dyn(declared, item))
            .collect()
    }

    /// Reads a `T` from JSON text.
    pub fn from_str<T: TypePath>(&self, json: &str) -> Result<T, Error> {
        self.from_value(serde_json::from_str(json)?)
    }

    fn read_type(&self, declared: &Type, object: &mut Object) -> Result<Type, Error> {
        if !self.reads_type_names() {
            return Ok(*declared);
        }
        let Some(tag) = object.remove(&*self.settings.type_property) else {
            return Ok(*declared);
        };
        let tag = match tag {
            Value::String(tag) => tag,
            other => return Err(Error::InvalidTypeName { found: other.to_string() }),
        };

        let (name, qualifier) = split_type_name(&tag);
        let ty = self.configuration.bind_to_type(qualifier, name)?;
        if !self.configuration.registry().is_assignable_from(declared, &ty) {
            return Err(Error::IncompatibleType {
                expected: declared.path(),
                actual: ty.path(),
            });
        }
        log::trace!("`{tag}` binds to `{ty}`");
        Ok(ty)
    }

    fn read_object(&self, ty: &Type, mut object: Object) -> Result<Box<dyn Any>, Error> {
        let contract = self.configuration.resolve_contract(ty)?;

        for property in contract.properties() {
            if property.required() != Required::Always {
                continue;
            }
            match find_key(&object, property.name()).and_then(|key| object.get(key)) {
                None => {
                    return Err(Error::MissingRequired {
                        ty: ty.path(),
                        name: property.name().to_string(),
                    });
                }
                Some(Value::Null) => {
                    return Err(Error::NullNotAllowed {
                        ty: ty.path(),
                        name: property.name().to_string(),
                    });
                }
                Some(_) => {}
            }
        }

        let mut instance = self.create(&contract, &mut object)?;

        for (key, value) in object {
            let Some(property) = contract.properties().closest_match(&key) else {
                log::trace!("skipping unknown member `{key}` of `{ty}`");
                continue;
            };
            if value.is_null() && property.required() != Required::Default {
                return Err(Error::NullNotAllowed {
                    ty: ty.path(),
                    name: property.name().to_string(),
                });
            }
            if !property.is_writable() {
                log::trace!("skipping read-only member `{key}` of `{ty}`");
                continue;
            }

            let mut de = <dyn erased_serde::Deserializer>::erase(value);
            property
                .set_value(&mut *instance, &mut de)
                .map_err(|source| Error::Property {
                    ty: ty.path(),
                    name: property.name().to_string(),
                    source,
                })?;
        }

        Ok(instance)
    }

    /// Builds the instance, removing the members passed to the creator.
    fn create(&self, contract: &Contract, object: &mut Object) -> Result<Box<dyn Any>, Error> {
        let ty = contract.ty();
        let Some(creator) = contract.override_creator() else {
            return contract
                .create_default()
                .ok_or(Error::NoCreator { ty: ty.path() });
        };

        let params = contract.creator_parameters().clone();
        let mut values = Vec::with_capacity(params.len());
        for param in params.iter() {
            let key = find_key(object, param.name()).map(str::to_owned);
            let value = key.and_then(|key| object.remove(&key));
            let value = match value {
                None | Some(Value::Null) => None,
                Some(value) => {
                    let mut de = <dyn erased_serde::Deserializer>::erase(value);
                    let value = param.deserialize(&mut de).map_err(|err| Error::Argument {
                        ty: ty.path(),
                        param: param.name().to_string(),
                        message: err.to_string(),
                    })?;
                    Some(value)
                }
            };
            values.push(value);
        }

        log::trace!("creating `{ty}` with {} arguments", values.len());
        Ok(creator.invoke(CreatorArgs::new(params, values)?)?)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::testing::*;
    use crate::{Error, JsonSerializer, JsonSettings, TypeNameHandling};
    use fj_contract::{BindError, Configuration, Configurator, CreateError};
    use fj_reflect::info::Type;
    use serde_json::json;
    use alloc::sync::Arc;
    use core::sync::atomic::{AtomicBool, Ordering};

    fn with_type_names(configuration: &Configuration) -> JsonSerializer {
        let settings = JsonSettings::default().with_type_name_handling(TypeNameHandling::Objects);
        JsonSerializer::with_settings(configuration, settings)
    }

    #[test]
    fn configured_property_names() {
        let mut configurator = Configurator::new(registry());
        configurator
            .configure::<Animal>(|t| {
                t.has_required_property(|m| m.get("Age"), |p| p.has_name("a"))?;
                Ok(())
            })
            .unwrap()
            .configure::<Cat>(|t| {
                t.has_required_property(|m| m.get("Paws"), |p| p.has_name("p"))?;
                Ok(())
            })
            .unwrap();
        let serializer = JsonSerializer::new(&configurator.complete());

        let cat: Cat = serializer.from_str(r#"{"a":5,"p":4}"#).unwrap();
        assert_eq!(cat.base.age, 5);
        assert_eq!(cat.paws, 4);
    }

    #[test]
    fn configured_type_names() {
        let mut configurator = Configurator::new(registry());
        configurator
            .configure::<Cat>(|t| {
                t.has_contract_name("c")?;
                Ok(())
            })
            .unwrap()
            .configure::<Bird>(|t| {
                t.has_contract_name("b")?;
                Ok(())
            })
            .unwrap();
        let serializer = with_type_names(&configurator.complete());

        let animals = serializer
            .from_seq(&Type::of::<Animal>(), json!([{ "$type": "c" }, { "$type": "b" }]))
            .unwrap();
        assert_eq!(animals.len(), 2);
        assert!(animals[0].is::<Cat>());
        assert!(animals[1].is::<Bird>());
    }

    #[test]
    fn qualified_type_names() {
        let serializer = with_type_names(&Configurator::new(registry()).complete());
        let tag = serializer.type_name(&Type::of::<Cat>());

        let cat = serializer
            .from_value_dyn(&Type::of::<Animal>(), json!({ "$type": tag, "Paws": 3 }))
            .unwrap();
        assert_eq!(cat.downcast_ref::<Cat>().map(|c| c.paws), Some(3));

        let wrong = format!("{}, zoo", Type::of::<Cat>().path());
        let err = serializer
            .from_value_dyn(&Type::of::<Animal>(), json!({ "$type": wrong }))
            .unwrap_err();
        assert!(matches!(err, Error::Bind(BindError::QualifierMismatch { .. })));
    }

    #[test]
    fn type_names_must_be_assignable() {
        let mut configurator = Configurator::new(registry());
        configurator
            .configure::<Sensor>(|t| {
                t.has_contract_name("s")?;
                Ok(())
            })
            .unwrap();
        let serializer = with_type_names(&configurator.complete());

        let err = serializer
            .from_value_dyn(&Type::of::<Animal>(), json!({ "$type": "s" }))
            .unwrap_err();
        assert!(matches!(err, Error::IncompatibleType { .. }));

        let err = serializer
            .from_value_dyn(&Type::of::<Animal>(), json!({ "$type": 7 }))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTypeName { .. }));
    }

    #[test]
    fn type_names_ignored_without_handling() {
        let mut configurator = Configurator::new(registry());
        configurator
            .configure::<Cat>(|t| {
                t.has_contract_name("c")?;
                Ok(())
            })
            .unwrap();
        let serializer = JsonSerializer::new(&configurator.complete());

        let err = serializer
            .from_value_dyn(&Type::of::<Animal>(), json!({ "$type": "c" }))
            .unwrap_err();
        assert!(matches!(err, Error::NoCreator { .. }));
    }

    #[test]
    fn custom_default_creator() {
        let called = Arc::new(AtomicBool::new(false));
        let flag = called.clone();

        let mut configurator = Configurator::new(registry());
        configurator
            .configure::<Cat>(move |t| {
                t.construct_with(move || {
                    flag.store(true, Ordering::SeqCst);
                    Cat {
                        base: Animal { age: 123 },
                        paws: 0,
                    }
                });
                Ok(())
            })
            .unwrap();
        let serializer = JsonSerializer::new(&configurator.complete());

        let cat: Cat = serializer.from_str("{}").unwrap();
        assert!(called.load(Ordering::SeqCst));
        assert_eq!(cat.base.age, 123);
    }

    #[test]
    fn positional_override_creator() {
        let called = Arc::new(AtomicBool::new(false));
        let flag = called.clone();

        let mut configurator = Configurator::new(registry());
        configurator
            .configure::<Dog>(move |t| {
                t.construct_with_args(move |mut args| {
                    flag.store(true, Ordering::SeqCst);
                    Ok(Dog::new(args.take(0)?, args.take(1)?))
                });
                Ok(())
            })
            .unwrap();
        let serializer = JsonSerializer::new(&configurator.complete());

        let dog: Dog = serializer
            .from_str(r#"{"a":1,"b":2,"tail":34,"age":12,"f":6}"#)
            .unwrap();
        assert!(called.load(Ordering::SeqCst));
        assert_eq!(dog.base.age, 12);
        assert_eq!(dog.tail, 34);
    }

    #[test]
    fn typed_override_creator() {
        let x = 444;

        let mut configurator = Configurator::new(registry());
        configurator
            .configure::<Animal>(|t| {
                t.ignore_property(|m| m.get("Age"))?;
                Ok(())
            })
            .unwrap()
            .configure::<Dog>(|t| {
                t.construct_with_params(&["b", "age", "f"], move |b: i32, _age: i32, _f: i32| Dog::new(b, x))?
                    .ignore_property(|m| m.get("Tail"))?;
                Ok(())
            })
            .unwrap();
        let serializer = JsonSerializer::new(&configurator.complete());

        let dog: Dog = serializer.from_str(r#"{"age":123,"b":2,"f":6}"#).unwrap();
        assert_eq!(dog.base.age, 2);
        assert_eq!(dog.tail, 444);
    }

    #[test]
    fn typed_creator_reorders_arguments() {
        fn create_dog(age: i32, tail: i32) -> Dog {
            Dog::new(age, tail)
        }

        let mut configurator = Configurator::new(registry());
        configurator
            .configure::<Animal>(|t| {
                t.ignore_property(|m| m.get("Age"))?;
                Ok(())
            })
            .unwrap()
            .configure::<Dog>(|t| {
                t.construct_with_params(&["a", "b", "c"], |_a: i32, b: i32, c: i32| create_dog(b, c))?
                    .ignore_property(|m| m.get("Tail"))?;
                Ok(())
            })
            .unwrap();
        let serializer = JsonSerializer::new(&configurator.complete());

        let dog: Dog = serializer.from_str(r#"{"a":1,"b":2,"c":3}"#).unwrap();
        assert_eq!(dog, Dog::new(2, 3));
    }

    #[test]
    fn missing_creator_argument() {
        let mut configurator = Configurator::new(registry());
        configurator
            .configure::<Dog>(|t| {
                t.construct_with_params(&["age", "tail"], Dog::new)?;
                Ok(())
            })
            .unwrap();
        let serializer = JsonSerializer::new(&configurator.complete());

        let err = serializer.from_str::<Dog>(r#"{"age":1}"#).unwrap_err();
        assert!(matches!(err, Error::Create(CreateError::ArgumentNull { ref param }) if param == "tail"));

        let err = serializer.from_str::<Dog>(r#"{"age":"old","tail":1}"#).unwrap_err();
        assert!(matches!(err, Error::Argument { ref param, .. } if param == "age"));
    }

    #[test]
    fn no_creator() {
        let serializer = JsonSerializer::new(&Configurator::new(registry()).complete());
        let err = serializer.from_str::<Dog>(r#"{"Tail":1}"#).unwrap_err();
        assert!(matches!(err, Error::NoCreator { .. }));
    }

    #[test]
    fn explicit_interface_members() {
        let mut configurator = Configurator::new(registry());
        configurator
            .configure::<dyn Measured>(|t| {
                t.has_optional_property(|m| m.get("Reading"), |p| p.has_name("reading"))?
                    .has_optional_property(|m| m.get("Limit"), |p| p.has_name("max"))?;
                Ok(())
            })
            .unwrap()
            .configure::<Sensor>(|t| {
                t.has_optional_property(|m| m.get("Id"), |p| p.has_name("id"))?;
                Ok(())
            })
            .unwrap();
        let serializer = JsonSerializer::new(&configurator.complete());

        let sensor: Sensor = serializer
            .from_str(r#"{"id":321,"reading":567,"max":951}"#)
            .unwrap();
        assert_eq!(sensor, Sensor { id: 321, limit: 951 });
    }

    #[test]
    fn names_match_ignoring_case() {
        let serializer = JsonSerializer::new(&Configurator::new(registry()).complete());
        let cat: Cat = serializer.from_str(r#"{"age":7,"PAWS":3,"tail":1}"#).unwrap();
        assert_eq!(cat.base.age, 7);
        assert_eq!(cat.paws, 3);
    }

    #[test]
    fn nested_values_use_serde() {
        let serializer = JsonSerializer::new(&Configurator::new(registry()).complete());
        let bird: Bird = serializer
            .from_str(r#"{"Ring":{"color":"blue","bells":2},"Ring2":null}"#)
            .unwrap();
        assert_eq!(
            bird.ring,
            Some(Collar {
                color: String::from("blue"),
                bells: 2,
            })
        );
    }

    #[test]
    fn required_members() {
        let mut configurator = Configurator::new(registry());
        configurator
            .configure::<Cat>(|t| {
                t.has_required_property(|m| m.get("Paws"), |p| p.has_name("p"))?;
                Ok(())
            })
            .unwrap();
        let serializer = JsonSerializer::new(&configurator.complete());

        let err = serializer.from_str::<Cat>(r#"{"Age":1}"#).unwrap_err();
        assert!(matches!(err, Error::MissingRequired { ref name, .. } if name == "p"));

        let err = serializer.from_str::<Cat>(r#"{"p":null}"#).unwrap_err();
        assert!(matches!(err, Error::NullNotAllowed { ref name, .. } if name == "p"));
    }

    #[test]
    fn disallowed_null_values() {
        let mut configurator = Configurator::new(registry());
        configurator
            .disallow_null_values()
            .configure::<Bird>(|t| {
                t.has_optional_property(|m| m.get("Ring"), |p| p)?;
                Ok(())
            })
            .unwrap();
        let serializer = JsonSerializer::new(&configurator.complete());

        let bird: Bird = serializer.from_str(r#"{"Wings":2}"#).unwrap();
        assert_eq!(bird.wings, 2);

        let err = serializer.from_str::<Bird>(r#"{"Ring":null}"#).unwrap_err();
        assert!(matches!(err, Error::NullNotAllowed { .. }));
    }

    #[test]
    fn null_checked_before_read_only_skip() {
        let mut configurator = Configurator::new(registry());
        configurator
            .disallow_null_values()
            .configure::<dyn Measured>(|t| {
                t.has_optional_property(|m| m.get("Reading"), |p| p.has_name("reading"))?;
                Ok(())
            })
            .unwrap();
        let serializer = JsonSerializer::new(&configurator.complete());

        let sensor: Sensor = serializer.from_str(r#"{"reading":40}"#).unwrap();
        assert_eq!(sensor, Sensor::default());

        let err = serializer.from_str::<Sensor>(r#"{"reading":null}"#).unwrap_err();
        assert!(matches!(err, Error::NullNotAllowed { ref name, .. } if name == "reading"));
    }

    #[test]
    fn shape_errors() {
        let serializer = JsonSerializer::new(&Configurator::new(registry()).complete());
        assert!(matches!(
            serializer.from_value::<Cat>(json!([1])).unwrap_err(),
            Error::ExpectedObject { .. }
        ));
        assert!(matches!(
            serializer.from_seq(&Type::of::<Cat>(), json!({})).unwrap_err(),
            Error::ExpectedArray { .. }
        ));
        assert!(matches!(
            serializer.from_str::<Cat>("{").unwrap_err(),
            Error::Json(_)
        ));
    }

    #[test]
    fn round_trip_through_base_type() {
        let mut configurator = Configurator::new(registry());
        configurator
            .configure::<Bird>(|t| {
                t.has_contract_name("bird")?;
                Ok(())
            })
            .unwrap();
        let configuration = configurator.complete();
        let settings = JsonSettings::default().with_type_name_handling(TypeNameHandling::Auto);
        let serializer = JsonSerializer::with_settings(&configuration, settings);

        let bird = Bird {
            base: Animal { age: 3 },
            wings: 2,
            ring: None,
        };
        let json = serializer.to_value_as(&bird, &Type::of::<Animal>()).unwrap();
        assert_eq!(json["$type"], "bird");

        let read = serializer.from_value_dyn(&Type::of::<Animal>(), json).unwrap();
        assert_eq!(read.downcast_ref::<Bird>(), Some(&bird));
    }
}
