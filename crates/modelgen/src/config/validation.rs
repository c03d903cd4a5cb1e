//! Configuration validation.

use super::Config;
use crate::error::{GenerateError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    config.output_path()?;
    config.namespace()?;
    config.database_sub_directory()?;

    if let Some(ref indent) = config.output.indent {
        if indent.contains('\n') {
            return Err(GenerateError::Config(
                "output.indent must not contain line breaks".into(),
            ));
        }
    }

    if let Some(ref extends) = config.output.extends {
        if extends.trim().ends_with('\\') {
            return Err(GenerateError::Config(format!(
                "output.extends must name a class, got '{}'",
                extends
            )));
        }
    }

    for (name, conn) in &config.connections {
        if conn.driver.trim().is_empty() {
            return Err(GenerateError::Config(format!(
                "connections.{}.driver is required",
                name
            )));
        }
    }

    for (connection, tables) in &config.constants {
        for (table, spec) in tables {
            for (from, _) in &spec.replace {
                if from.is_empty() {
                    return Err(GenerateError::Config(format!(
                        "constants.{}.{}.replace contains an empty key",
                        connection, table
                    )));
                }
            }
        }
    }

    if config.replace.keys().any(|k| k.is_empty()) {
        return Err(GenerateError::Config(
            "replace contains an empty key".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConnectionConfig, ConstantSpec, OutputConfig};

    fn valid_config() -> Config {
        let mut config = Config {
            output: OutputConfig {
                path: Some("app/Models".into()),
                namespace: Some("App\\Models".into()),
                database_sub_directory: Some(true),
                ..OutputConfig::default()
            },
            ..Config::default()
        };
        config.connections.insert(
            "main".into(),
            ConnectionConfig {
                database: "shop".into(),
                user: "root".into(),
                password: "secret".into(),
                ..ConnectionConfig::default()
            },
        );
        config
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_path() {
        let mut config = valid_config();
        config.output.path = None;
        let err = validate(&config).unwrap_err();
        assert!(matches!(err, GenerateError::ConfigurationMissing(ref k) if k == "output.path"));
    }

    #[test]
    fn test_missing_namespace() {
        let mut config = valid_config();
        config.output.namespace = None;
        let err = validate(&config).unwrap_err();
        assert!(
            matches!(err, GenerateError::ConfigurationMissing(ref k) if k == "output.namespace")
        );
    }

    #[test]
    fn test_missing_sub_directory_flag() {
        let mut config = valid_config();
        config.output.database_sub_directory = None;
        let err = validate(&config).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::ConfigurationMissing(ref k) if k == "output.database_sub_directory"
        ));
    }

    #[test]
    fn test_multiline_indent_rejected() {
        let mut config = valid_config();
        config.output.indent = Some("\n".into());
        assert!(matches!(validate(&config), Err(GenerateError::Config(_))));
    }

    #[test]
    fn test_empty_replace_key_rejected() {
        let mut config = valid_config();
        let mut spec = ConstantSpec::new("id", "name");
        spec.replace.insert(String::new(), "X".into());
        config
            .constants
            .entry("main".into())
            .or_default()
            .insert("roles".into(), spec);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_connection_config_debug_redacts_password() {
        let config = valid_config();
        let debug_output = format!("{:?}", config.connections["main"]);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("secret"));
    }
}
