//! # modelgen
//!
//! Schema-driven model generation for Eloquent-style PHP models.
//!
//! This library reads table metadata from a database and renders one model
//! file per table:
//!
//! - **Column classification** into fillable and guarded lists
//! - **Lookup constants** derived from the rows of small tables
//! - **Preserved regions** so hand-written code after the marker comment
//!   survives regeneration
//! - **Stub templates** with `{{token}}` placeholders
//!
//! Generation is idempotent: rerunning it against an unchanged schema and
//! an unedited file produces byte-identical output.
//!
//! ## Example
//!
//! ```rust,no_run
//! use modelgen::{Artifact, Config, DriverImpl, Generator, GeneratorSettings};
//!
//! #[tokio::main]
//! async fn main() -> modelgen::Result<()> {
//!     let config = Config::load("modelgen.yaml")?;
//!     let settings = GeneratorSettings::from_config(&config, "main")?;
//!     let driver = DriverImpl::connect("main", config.connection("main")?).await?;
//!     let generator = Generator::new(driver, settings);
//!
//!     let prior = std::fs::read_to_string(generator.settings().model_path("users")).ok();
//!     if let Artifact::Rendered(text) = generator.generate("users", &config.guarded, prior.as_deref()).await? {
//!         println!("{}", text);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod drivers;
pub mod error;
pub mod generator;
pub mod naming;
pub mod typemap;

// Re-exports for convenient access
pub use config::{Config, ConnectionConfig, ConstantSpec, OutputConfig};
pub use crate::core::{ColumnInfo, ConnectionDescriptor, EngineKind, LookupRow, SchemaDriver, TableProperties};
pub use drivers::DriverImpl;
pub use error::{GenerateError, Result};
pub use generator::{Artifact, Generator, GeneratorSettings, PreservedContent, Sentinel};
