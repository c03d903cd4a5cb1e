//! Identifier validation and quoting for dynamically built lookup queries.
//!
//! Table and column names cannot be bound as statement parameters, so the
//! lookup read that feeds constant extraction splices them into the SQL
//! text. Every such identifier is validated first and then quoted.

use crate::error::{GenerateError, Result};

/// MySQL identifiers are limited to 64 characters.
const MAX_IDENTIFIER_LENGTH: usize = 64;

/// Validate an identifier before it is quoted into SQL.
///
/// Rejects empty identifiers, identifiers containing null bytes and
/// identifiers longer than the engine allows.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(GenerateError::InvalidIdentifier(
            "identifier cannot be empty".to_string(),
        ));
    }

    if name.contains('\0') {
        return Err(GenerateError::InvalidIdentifier(format!(
            "identifier contains null byte: {:?}",
            name
        )));
    }

    if name.chars().count() > MAX_IDENTIFIER_LENGTH {
        return Err(GenerateError::InvalidIdentifier(format!(
            "identifier exceeds {} characters: {:?}",
            MAX_IDENTIFIER_LENGTH, name
        )));
    }

    Ok(())
}

/// Quote a MySQL identifier using backticks.
///
/// ```ignore
/// assert_eq!(quote_mysql("users")?, "`users`");
/// assert_eq!(quote_mysql("table`name")?, "`table``name`");
/// ```
pub fn quote_mysql(name: &str) -> Result<String> {
    validate_identifier(name)?;
    Ok(format!("`{}`", name.replace('`', "``")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_mysql() {
        assert_eq!(quote_mysql("users").unwrap(), "`users`");
        assert_eq!(quote_mysql("table`name").unwrap(), "`table``name`");
        assert_eq!(quote_mysql("role name").unwrap(), "`role name`");
    }

    #[test]
    fn test_rejects_empty() {
        assert!(validate_identifier("").is_err());
    }

    #[test]
    fn test_rejects_null_byte() {
        let err = quote_mysql("users\0; DROP TABLE x").unwrap_err();
        assert!(matches!(err, GenerateError::InvalidIdentifier(_)));
    }

    #[test]
    fn test_length_limit() {
        assert!(validate_identifier(&"a".repeat(64)).is_ok());
        assert!(validate_identifier(&"a".repeat(65)).is_err());
    }
}
