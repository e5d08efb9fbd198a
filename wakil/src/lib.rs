//! # Wakil — name-based dependency injection for Rust
//!
//! Providers are registered under a name, their parameter names are the
//! names of the providers they depend on, and the container builds and
//! memoizes every value on first use.
//!
//! ```rust
//! use wakil::prelude::*;
//!
//! let container = Container::new();
//! container.register(Thing::function("greeting", &[], |_| Ok("hello"))).unwrap();
//!
//! let shout = Thing::function("shout", &["greeting"], |args| {
//!     Ok(args.cloned::<&str>("greeting")?.to_uppercase())
//! });
//! assert_eq!(container.invoke_as::<String>(&shout, CallArgs::new()).unwrap(), "HELLO");
//! ```

pub use wakil_container::*;
pub use wakil_macros::*;
pub use wakil_support::*;

/// Items the `#[provide]` expansion refers to.
#[doc(hidden)]
pub mod __private {
    pub use inventory;
    pub use wakil_container::discovery::Marked;
}
