//! Request handlers for the favorites API.

mod list;
mod mutate;

pub use list::*;
pub use mutate::*;
