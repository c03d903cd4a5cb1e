//! Error types for the model generator.

use thiserror::Error;

/// Exit code for configuration problems.
pub const EXIT_CONFIG_ERROR: u8 = 1;

/// Exit code for unknown or unimplemented drivers.
pub const EXIT_DRIVER_ERROR: u8 = 2;

/// Exit code for database connection or query failures.
pub const EXIT_DATABASE_ERROR: u8 = 3;

/// Exit code for constant specs that reference missing fields.
pub const EXIT_MISSING_FIELD: u8 = 4;

/// Exit code for file operations.
pub const EXIT_IO_ERROR: u8 = 7;

/// Main error type for generation operations.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// A required configuration setting is absent.
    #[error("You must set up {0}.")]
    ConfigurationMissing(String),

    /// A configuration value is present but malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The configured driver name is not a known engine.
    #[error("Connection-driver [{0}] not supported.")]
    UnsupportedDriver(String),

    /// The engine is known but introspection is not available for it.
    #[error("Driver [{0}] is not implemented yet.")]
    Unimplemented(String),

    /// A constant spec or a lookup row lacks a required field.
    #[error("Field \"{field}\" not set for table [{table}].")]
    MissingField { table: String, field: String },

    /// The requested connection is not configured.
    #[error("Connection [{0}] not found.")]
    ConnectionNotFound(String),

    /// An identifier failed validation before being quoted into SQL.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Database connection or query error with context
    #[error("Database error: {message}\n  Context: {context}")]
    Pool { message: String, context: String },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GenerateError {
    /// Create a Pool error with context about where it occurred
    pub fn pool(message: impl std::fmt::Display, context: impl Into<String>) -> Self {
        GenerateError::Pool {
            message: message.to_string(),
            context: context.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(table: impl Into<String>, field: impl Into<String>) -> Self {
        GenerateError::MissingField {
            table: table.into(),
            field: field.into(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            GenerateError::ConfigurationMissing(_)
            | GenerateError::Config(_)
            | GenerateError::ConnectionNotFound(_)
            | GenerateError::InvalidIdentifier(_)
            | GenerateError::Yaml(_) => EXIT_CONFIG_ERROR,
            GenerateError::UnsupportedDriver(_) | GenerateError::Unimplemented(_) => {
                EXIT_DRIVER_ERROR
            }
            GenerateError::Pool { .. } => EXIT_DATABASE_ERROR,
            GenerateError::MissingField { .. } => EXIT_MISSING_FIELD,
            GenerateError::Io(_) => EXIT_IO_ERROR,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, GenerateError>;
