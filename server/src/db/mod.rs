//! Database module for PostgreSQL persistence.

mod favorites;
mod pool;
mod tokens;

pub use favorites::*;
pub use pool::*;
pub use tokens::*;
