//! modelgen CLI - Generate Eloquent models from a database schema.

mod init;

use clap::{Parser, Subcommand};
use modelgen::{
    Artifact, Config, DriverImpl, GenerateError, Generator, GeneratorSettings, SchemaDriver,
};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, Level};

/// Table argument meaning "every table of the connection".
const ALL_TABLES: &str = ".";

#[derive(Parser)]
#[command(name = "modelgen")]
#[command(about = "Generate Eloquent models from a database schema")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "modelgen.yaml")]
    config: PathBuf,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate models for tables of a connection
    Generate {
        /// Connection name from the configuration
        connection: String,

        /// Comma-separated table names, or "." for all tables
        tables: String,

        /// Comma-separated guarded columns (overrides the configured list)
        #[arg(long)]
        guarded: Option<String>,

        /// Print models to stdout instead of writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// List the tables of a connection
    Tables {
        /// Connection name from the configuration
        connection: String,
    },

    /// Write a starter configuration file
    Init {
        /// Output path for configuration file [default: modelgen.yaml]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force overwrite existing file
        #[arg(long, short)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), GenerateError> {
    let cli = Cli::parse();

    // Init writes the config file, so it cannot depend on loading one
    if let Commands::Init { output, force } = cli.command {
        let output_path = output.unwrap_or_else(|| PathBuf::from("modelgen.yaml"));
        init::write_starter_config(&output_path, force)?;
        println!("Configuration written to {}", output_path.display());
        return Ok(());
    }

    setup_logging(&cli.verbosity, &cli.log_format).map_err(GenerateError::Config)?;

    let config = Config::load(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);

    match cli.command {
        Commands::Init { .. } => unreachable!(), // Handled above
        Commands::Generate {
            connection,
            tables,
            guarded,
            dry_run,
        } => {
            let guarded = match guarded {
                Some(list) => split_list(&list),
                None => config.guarded.clone(),
            };
            generate(&config, &connection, &tables, &guarded, dry_run).await?;
        }

        Commands::Tables { connection } => {
            let driver = DriverImpl::connect(&connection, config.connection(&connection)?).await?;
            let tables = driver.list_tables().await;
            driver.close().await;
            for table in tables? {
                println!("{}", table);
            }
        }
    }

    Ok(())
}

async fn generate(
    config: &Config,
    connection: &str,
    tables: &str,
    guarded: &[String],
    dry_run: bool,
) -> Result<(), GenerateError> {
    let settings = GeneratorSettings::from_config(config, connection)?;
    let driver = DriverImpl::connect(connection, config.connection(connection)?).await?;
    let generator = Generator::new(driver, settings);

    let result = generate_tables(&generator, tables, guarded, dry_run).await;
    generator.driver().close().await;
    result
}

async fn generate_tables(
    generator: &Generator<DriverImpl>,
    tables: &str,
    guarded: &[String],
    dry_run: bool,
) -> Result<(), GenerateError> {
    let tables = if tables == ALL_TABLES {
        generator.tables().await?
    } else {
        split_list(tables)
    };
    debug!("Generating {} tables", tables.len());

    for table in &tables {
        let path = generator.settings().model_path(table);

        if !dry_run {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let prior = match std::fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        match generator.generate(table, guarded, prior.as_deref()).await? {
            Artifact::Rendered(text) if dry_run => print!("{}", text),
            Artifact::Rendered(text) => {
                std::fs::write(&path, text)?;
                println!("Model [{}] created.", path.display());
            }
            Artifact::Skipped => println!("Table [{}] does not exist.", table),
        }
    }

    Ok(())
}

/// Split a comma-separated argument, dropping empty entries.
fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout is reserved for dry-run models
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        "json" => subscriber.json().init(),
        "text" => subscriber.init(),
        other => return Err(format!("unknown log format '{}'", other)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("users, orders,,user_roles "), vec!["users", "orders", "user_roles"]);
        assert!(split_list("").is_empty());
    }
}
