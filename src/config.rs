//! Settings schema and loading.
//!
//! Everything has a default; a missing or broken config file never keeps
//! the player from starting.

mod load;
mod schema;

pub use schema::*;
