//! Typed handlers.
//!
//! Any `fn(&mut Ctx, A1, .., An) -> Result<R, AppError>` with marshallable
//! arguments and result (up to six arguments) is a [`Handler`]. The
//! parameter and return schemas come from the types, so registration needs
//! nothing but parameter names.

use zomekit_core::{DecodeError, Marshal, Schema, Value};

use crate::context::Ctx;
use crate::error::AppError;

/// Why a call into a handler failed.
#[derive(Debug, Clone, PartialEq)]
pub enum CallError {
    /// An argument value had the wrong shape.
    Argument {
        /// Zero-based argument position.
        index: usize,
        /// What was wrong with it.
        source: DecodeError,
    },
    /// The implementation itself failed.
    Application(AppError),
}

impl From<AppError> for CallError {
    fn from(err: AppError) -> Self {
        CallError::Application(err)
    }
}

/// A function the exporter can call with decoded arguments.
///
/// `Args` is the tuple of argument types; it only exists so that one
/// function type maps to exactly one implementation.
pub trait Handler<Args>: Send + Sync + 'static {
    /// Schemas of the arguments, in order.
    fn param_schemas() -> Vec<Schema>;

    /// Schema of the result.
    fn return_schema() -> Schema;

    /// Convert the arguments, run the function, convert the result.
    fn call(&self, ctx: &mut Ctx<'_>, args: Vec<Value>) -> Result<Value, CallError>;
}

fn take_arg<T: Marshal>(
    args: &mut impl Iterator<Item = Value>,
    index: &mut usize,
) -> Result<T, CallError> {
    let position = *index;
    *index += 1;
    let value = args.next().ok_or_else(|| CallError::Argument {
        index: position,
        source: DecodeError::malformed("missing argument"),
    })?;
    T::from_value(value).map_err(|source| CallError::Argument {
        index: position,
        source,
    })
}

macro_rules! impl_handler {
    ($($ty:ident),*) => {
        #[allow(non_snake_case, unused_mut, unused_variables)]
        impl<F, R, $($ty,)*> Handler<($($ty,)*)> for F
        where
            F: Fn(&mut Ctx<'_>, $($ty,)*) -> Result<R, AppError> + Send + Sync + 'static,
            R: Marshal,
            $($ty: Marshal,)*
        {
            fn param_schemas() -> Vec<Schema> {
                vec![$($ty::schema(),)*]
            }

            fn return_schema() -> Schema {
                R::schema()
            }

            fn call(&self, ctx: &mut Ctx<'_>, args: Vec<Value>) -> Result<Value, CallError> {
                let mut args = args.into_iter();
                let mut index = 0;
                $(
                    let $ty = take_arg::<$ty>(&mut args, &mut index)?;
                )*
                let result = (self)(ctx, $($ty,)*)?;
                Ok(result.to_value())
            }
        }
    };
}

impl_handler!();
impl_handler!(A1);
impl_handler!(A1, A2);
impl_handler!(A1, A2, A3);
impl_handler!(A1, A2, A3, A4);
impl_handler!(A1, A2, A3, A4, A5);
impl_handler!(A1, A2, A3, A4, A5, A6);

#[cfg(test)]
mod tests {
    use super::*;

    fn arity<Args, H: Handler<Args>>(_: &H) -> usize {
        H::param_schemas().len()
    }

    fn none(_: &mut Ctx<'_>) -> Result<(), AppError> {
        Ok(())
    }

    fn two(_: &mut Ctx<'_>, a: String, b: Option<i64>) -> Result<Vec<i32>, AppError> {
        Ok(vec![a.len() as i32, b.unwrap_or_default() as i32])
    }

    #[test]
    fn schemas_follow_the_signature() {
        assert_eq!(arity(&none), 0);
        assert_eq!(arity(&two), 2);
        assert_eq!(
            <fn(&mut Ctx<'_>, String, Option<i64>) -> Result<Vec<i32>, AppError> as Handler<(
                String,
                Option<i64>,
            )>>::param_schemas(),
            vec![Schema::String, Schema::optional(Schema::Int64)]
        );
    }

    #[test]
    fn take_arg_reports_position() {
        let mut args = vec![Value::from("x"), Value::from(true)].into_iter();
        let mut index = 0;
        assert_eq!(take_arg::<String>(&mut args, &mut index).unwrap(), "x");
        let err = take_arg::<i32>(&mut args, &mut index).unwrap_err();
        assert!(matches!(err, CallError::Argument { index: 1, .. }));
        let err = take_arg::<i32>(&mut args, &mut index).unwrap_err();
        assert!(matches!(err, CallError::Argument { index: 2, .. }));
    }
}
