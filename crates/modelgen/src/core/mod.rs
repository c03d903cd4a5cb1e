//! Core abstractions shared by the drivers and the generator.
//!
//! - [`schema`]: connection, column and classified table types
//! - [`traits`]: the [`SchemaDriver`] introspection trait
//! - [`identifier`]: identifier validation and quoting

pub mod identifier;
pub mod schema;
pub mod traits;

pub use schema::{ColumnInfo, ConnectionDescriptor, EngineKind, LookupRow, TableProperties};
pub use traits::SchemaDriver;
