use alloc::sync::Arc;
use core::any::Any;
use core::fmt;

use fj_reflect::info::ParamInfo;
use serde_core::de::DeserializeOwned;
use serde_core::de::value::{Error as ValueError, UnitDeserializer};

use crate::CreateError;

// -----------------------------------------------------------------------------
// CreatorArgs

/// Positional arguments for a construction override.
///
/// Each slot holds the deserialized argument for the parameter at the same
/// index, or `None` when the document had no value (or `null`) for it.
pub struct CreatorArgs {
    params: Arc<[ParamInfo]>,
    values: Vec<Option<Box<dyn Any>>>,
}

impl CreatorArgs {
    /// Pairs argument values with their parameters.
    pub fn new(params: Arc<[ParamInfo]>, values: Vec<Option<Box<dyn Any>>>) -> Result<Self, CreateError> {
        if params.len() != values.len() {
            return Err(CreateError::ArgumentCount {
                expected: params.len(),
                actual: values.len(),
            });
        }
        Ok(Self { params, values })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn params(&self) -> &[ParamInfo] {
        &self.params
    }

    /// Whether the argument at `index` is missing or `null`.
    #[inline]
    pub fn is_null(&self, index: usize) -> bool {
        self.values.get(index).is_none_or(Option::is_none)
    }

    /// Takes the argument at `index` as a `P`.
    ///
    /// A missing argument is accepted only if `P` deserializes from unit,
    /// as `Option<_>` does; otherwise [`CreateError::ArgumentNull`] is
    /// returned. Each argument can be taken once.
    pub fn take<P: DeserializeOwned + 'static>(&mut self, index: usize) -> Result<P, CreateError> {
        let Some(param) = self.params.get(index) else {
            return Err(CreateError::ArgumentCount {
                expected: index + 1,
                actual: self.params.len(),
            });
        };

        match self.values.get_mut(index).and_then(Option::take) {
            Some(value) => value
                .downcast::<P>()
                .map(|value| *value)
                .map_err(|_| CreateError::ArgumentType {
                    param: param.name().to_string(),
                    expected: core::any::type_name::<P>(),
                }),
            None => P::deserialize(UnitDeserializer::<ValueError>::new()).map_err(|_| {
                CreateError::ArgumentNull {
                    param: param.name().to_string(),
                }
            }),
        }
    }
}

impl fmt::Debug for CreatorArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatorArgs")
            .field("params", &self.params)
            .field("present", &self.values.iter().map(Option::is_some).collect::<Vec<_>>())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// OverrideCreator

type CreatorFn = Arc<dyn Fn(CreatorArgs) -> Result<Box<dyn Any>, CreateError> + Send + Sync>;

/// A parametrized factory replacing the default construction of a type.
///
/// Typed factories declare their parameters; raw positional factories use
/// the constructor parameters registered on the type.
#[derive(Clone)]
pub struct OverrideCreator {
    params: Option<Arc<[ParamInfo]>>,
    func: CreatorFn,
}

impl OverrideCreator {
    pub(crate) fn raw<T: Any>(
        f: impl Fn(CreatorArgs) -> Result<T, CreateError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            params: None,
            func: Arc::new(move |args| f(args).map(|value| Box::new(value) as Box<dyn Any>)),
        }
    }

    pub(crate) fn typed<T, Args, F>(names: &[&str], f: F) -> Self
    where
        F: IntoOverrideCreator<T, Args>,
    {
        Self {
            params: Some(F::param_infos(names).into()),
            func: f.into_creator(),
        }
    }

    /// Parameters declared by a typed factory.
    #[inline]
    pub fn declared_params(&self) -> Option<&Arc<[ParamInfo]>> {
        self.params.as_ref()
    }

    /// Runs the factory.
    #[inline]
    pub fn invoke(&self, args: CreatorArgs) -> Result<Box<dyn Any>, CreateError> {
        (self.func)(args)
    }
}

impl fmt::Debug for OverrideCreator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverrideCreator")
            .field("params", &self.params)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// IntoOverrideCreator

/// A closure usable as a typed construction override.
///
/// Implemented for `Fn(P0, .., Pn) -> T` with up to eight parameters, each
/// deserializable. Parameter names are supplied next to the closure.
pub trait IntoOverrideCreator<T, Args>: Send + Sync + 'static {
    /// Number of parameters.
    const ARITY: usize;

    /// Describes the parameters under `names`.
    fn param_infos(names: &[&str]) -> Vec<ParamInfo>;

    /// Erases the closure.
    fn into_creator(self) -> CreatorFn;
}

macro_rules! impl_into_override_creator {
    ($arity:literal; $($P:ident : $idx:tt),+) => {
        impl<T, F, $($P,)+> IntoOverrideCreator<T, ($($P,)+)> for F
        where
            T: Any,
            F: Fn($($P),+) -> T + Send + Sync + 'static,
            $($P: DeserializeOwned + 'static,)+
        {
            const ARITY: usize = $arity;

            fn param_infos(names: &[&str]) -> Vec<ParamInfo> {
                let mut names = names.iter().copied();
                vec![$(ParamInfo::of::<$P>(names.next().unwrap_or_default())),+]
            }

            fn into_creator(self) -> CreatorFn {
                Arc::new(move |mut args: CreatorArgs| {
                    let value = (self)($(args.take::<$P>($idx)?),+);
                    Ok(Box::new(value) as Box<dyn Any>)
                })
            }
        }
    };
}

impl_into_override_creator!(1; P0: 0);
impl_into_override_creator!(2; P0: 0, P1: 1);
impl_into_override_creator!(3; P0: 0, P1: 1, P2: 2);
impl_into_override_creator!(4; P0: 0, P1: 1, P2: 2, P3: 3);
impl_into_override_creator!(5; P0: 0, P1: 1, P2: 2, P3: 3, P4: 4);
impl_into_override_creator!(6; P0: 0, P1: 1, P2: 2, P3: 3, P4: 4, P5: 5);
impl_into_override_creator!(7; P0: 0, P1: 1, P2: 2, P3: 3, P4: 4, P5: 5, P6: 6);
impl_into_override_creator!(8; P0: 0, P1: 1, P2: 2, P3: 3, P4: 4, P5: 5, P6: 6, P7: 7);

// -----------------------------------------------------------------------------
// Tests
