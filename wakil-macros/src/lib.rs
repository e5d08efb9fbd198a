//! Procedural macros for Wakil.
//!
//! `#[provide]` marks a free function as a provider that
//! `Container::scan` can discover. The function itself is left exactly
//! as written.

use proc_macro::TokenStream;

mod provide;

/// Marks a function for discovery by `Container::scan`.
///
/// Parameter names become dependency names. `Arc<T>` parameters share
/// the registered value; any other parameter type is cloned out of it.
/// A function returning `Result<T, E>` fails resolution with
/// `WakilError::ConstructionFailed` when it returns `Err`.
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use wakil::provide;
///
/// #[provide]
/// fn one() -> i32 {
///     1
/// }
///
/// #[provide(name = "two")]
/// fn make_two(one: i32, also_one: Arc<i32>) -> i32 {
///     one + *also_one
/// }
/// ```
#[proc_macro_attribute]
pub fn provide(args: TokenStream, input: TokenStream) -> TokenStream {
    provide::expand(args.into(), input.into())
        .unwrap_or_else(|e| e.write_errors())
        .into()
}
