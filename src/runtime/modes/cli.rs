//! CLI mode
//!
//! One-shot commands that don't start the HTTP server.

use colored::Colorize;
use tracing::info;

use crate::cli::{Commands, ConfigAction};
use crate::config::{StaticConfig, get_config};
use crate::errors::{Result, SuiteError};
use crate::serial::SerialGenerator;

/// Run a CLI command
///
/// `Serve` is handled by the caller; passing it here is a no-op.
pub fn run_cli(command: Commands) -> Result<()> {
    match command {
        Commands::Serve => Ok(()),
        Commands::Serial { count } => {
            let generator = SerialGenerator::from_config(&get_config().serial);
            for _ in 0..count.max(1) {
                println!("{}", generator.generate_for(&()));
            }
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Generate { output } => generate_config(output.as_deref()),
        },
    }
}

fn generate_config(output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            StaticConfig::default()
                .save_to_file(path)
                .map_err(|e| SuiteError::config(format!("Failed to write {}: {}", path, e)))?;
            info!("Sample configuration written to {}", path);
            println!("{} {}", "Sample configuration written to".green(), path);
        }
        None => print!("{}", StaticConfig::generate_sample_config()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_config_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let path = path.to_str().unwrap();

        run_cli(Commands::Config {
            action: ConfigAction::Generate {
                output: Some(path.to_string()),
            },
        })
        .unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("[serial]"));
        assert!(content.contains("date_format"));
    }
}
