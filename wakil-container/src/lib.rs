//! Core container implementation for Wakil DI.

pub mod args;
pub mod container;
pub mod discovery;
pub mod error;
mod graph;
pub mod inspect;
pub mod invoke;
pub mod item;
mod registry;

pub use args::{Arguments, CallArgs, Value};
pub use container::{Container, ContainerBuilder, prelude};
pub use error::{Result, WakilError};
pub use inspect::{Callable, Thing};
pub use item::Item;
