//! Core data types

mod connection;
mod entity;
mod record;
mod search;

pub use connection::*;
pub use entity::*;
pub use record::*;
pub use search::*;
