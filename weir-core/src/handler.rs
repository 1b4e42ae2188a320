//! # Callables
//!
//! A [`Callable`] is the terminal point of a dispatch: the value a route
//! target resolves to, invoked with the assembled positional arguments.
//! Factories in the component registry are callables as well.
//!
//! # Usage Patterns
//!
//! 1. **Raw**: `Callable::new(|args: Args| { ... })` receives the argument list as is
//! 2. **Typed**: `Callable::from_fn(|id: u64, name: String| { ... })` extracts
//!    each parameter with [`FromValue`] and enforces the arity
//! 3. **Bound method**: [`bind`](crate::component::bind) turns a component method into a callable

use crate::{
    error::BoxError,
    extract::{Args, FromValue},
    value::{IntoValue, Value},
};
use std::{fmt, sync::Arc};

/// Shorthand for the result of user-supplied handlers and factories.
pub type Outcome<T = Value> = Result<T, BoxError>;

type CallFn = dyn Fn(Args) -> Result<Value, BoxError> + Send + Sync;

/// A type-erased, clonable function over positional arguments.
#[derive(Clone)]
pub struct Callable {
    name: Arc<str>,
    func: Arc<CallFn>,
}

impl Callable {
    /// Create a callable from a function over the raw argument list.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Args) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from("callable"),
            func: Arc::new(func),
        }
    }

    /// Create a callable from a typed function.
    ///
    /// Each parameter is extracted with [`FromValue`]; calling with the wrong
    /// number of arguments fails with [`ArgumentError::Arity`].
    ///
    /// [`ArgumentError::Arity`]: crate::ArgumentError::Arity
    pub fn from_fn<H, A>(handler: H) -> Self
    where
        H: Handler<A>,
        A: 'static,
    {
        Self::new(move |args| handler.invoke(args))
    }

    /// Attach a name used in logs and error messages.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Arc::from(name.into());
        self
    }

    /// The callable's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the callable.
    pub fn call(&self, args: Args) -> Result<Value, BoxError> {
        (self.func)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable").field("name", &self.name).finish()
    }
}

/// A typed function that can be invoked with positional [`Args`].
///
/// Implemented for `Fn(T1, ..., Tn) -> Result<O, E>` with up to eight
/// parameters, where every `Ti: FromValue`, `O: IntoValue` and
/// `E: Into<BoxError>`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a weir handler",
    label = "expected `Fn(T1, ..., Tn) -> Result<O, E>`",
    note = "Every parameter must implement `FromValue` and the function must return a `Result`."
)]
pub trait Handler<A>: Send + Sync + 'static {
    /// Extract the parameters from `args` and call the function.
    fn invoke(&self, args: Args) -> Result<Value, BoxError>;
}

/// Macro to implement Handler for functions with N extracted arguments.
macro_rules! impl_handler {
    // Base case: 0 arguments
    () => {
        impl<F, O, E> Handler<()> for F
        where
            F: Fn() -> Result<O, E> + Send + Sync + 'static,
            O: IntoValue,
            E: Into<BoxError>,
        {
            fn invoke(&self, args: Args) -> Result<Value, BoxError> {
                args.expect_arity(0)?;
                (self)().map(IntoValue::into_value).map_err(Into::into)
            }
        }
    };

    // Recursive case: 1+ arguments
    ($($T:ident),+) => {
        impl<F, O, E, $($T,)+> Handler<($($T,)+)> for F
        where
            F: Fn($($T,)+) -> Result<O, E> + Send + Sync + 'static,
            O: IntoValue,
            E: Into<BoxError>,
            $($T: FromValue + 'static,)+
        {
            #[allow(non_snake_case, unused_assignments)]
            fn invoke(&self, args: Args) -> Result<Value, BoxError> {
                args.expect_arity([$(stringify!($T)),+].len())?;
                let mut index = 0;
                $(
                    let $T = args.extract::<$T>(index)?;
                    index += 1;
                )+
                (self)($($T,)+).map(IntoValue::into_value).map_err(Into::into)
            }
        }
    };
}

impl_handler!();
impl_handler!(T1);
impl_handler!(T1, T2);
impl_handler!(T1, T2, T3);
impl_handler!(T1, T2, T3, T4);
impl_handler!(T1, T2, T3, T4, T5);
impl_handler!(T1, T2, T3, T4, T5, T6);
impl_handler!(T1, T2, T3, T4, T5, T6, T7);
impl_handler!(T1, T2, T3, T4, T5, T6, T7, T8);
