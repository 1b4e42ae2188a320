//! Procedural macros for Weir.
//!
//! - `#[component]` - Expose the methods of an impl block as a `Component`

use proc_macro::TokenStream;

mod component;

/// Expose the public `&self` methods of an inherent impl block as a
/// `weir::Component`.
///
/// Each argument is extracted with `FromValue` and checked for arity; the
/// return value is converted with `IntoValue`. Methods returning a `Result`
/// propagate their error.
///
/// # Example
///
/// ```rust,ignore
/// #[weir::component(name = "users")]
/// impl UsersController {
///     pub fn index(&self) -> Vec<UserView> { ... }
///     pub fn show(&self, user_id: u64) -> Result<UserView, BoxError> { ... }
/// }
/// ```
#[proc_macro_attribute]
pub fn component(attr: TokenStream, item: TokenStream) -> TokenStream {
    component::component_impl(attr, item)
}
