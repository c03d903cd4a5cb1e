//! Starter configuration file.

use std::path::Path;

use modelgen::{Config, GenerateError};

const HEADER: &str = r#"# Model generator configuration
# Generated by modelgen init
#
# constants:            lookup tables rendered as class constants
#   <connection>:
#     <table>: { id: id, name: name, prefix: "", suffix: "", replace: {} }
# timestamps:           tables whose models set $timestamps = true
#   <connection>: [<table>, ...]

"#;

/// Write the sample configuration to `path`.
///
/// An existing file is only replaced when `force` is set.
pub fn write_starter_config(path: &Path, force: bool) -> Result<(), GenerateError> {
    if path.exists() && !force {
        return Err(GenerateError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let yaml = Config::sample().to_yaml()?;
    std::fs::write(path, format!("{}{}", HEADER, yaml))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_written_config_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modelgen.yaml");
        write_starter_config(&path, false).unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.connection("main").is_ok());
    }

    #[test]
    fn test_existing_file_requires_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modelgen.yaml");
        std::fs::write(&path, "keep me").unwrap();

        let err = write_starter_config(&path, false).unwrap_err();
        assert!(matches!(err, GenerateError::Config(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");

        write_starter_config(&path, true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("# Model generator"));
    }
}
