//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// formsuite - model-driven forms and user-panel pages over HTTP
#[derive(Parser)]
#[command(name = "formsuite")]
#[command(version)]
#[command(about = "Model-driven forms and user-panel pages over HTTP", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(long, short = 'c', global = true, default_value = crate::config::DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Print newly generated serial numbers
    Serial {
        /// How many serials to print
        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,
    },

    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigAction {
    /// Generate a sample TOML configuration
    Generate {
        /// Output file path (default: stdout)
        output: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_means_serve() {
        let cli = Cli::parse_from(["formsuite"]);
        assert_eq!(cli.command, None);
        assert_eq!(cli.config, "config.toml");
    }

    #[test]
    fn test_parse_serial_with_global_config() {
        let cli = Cli::parse_from(["formsuite", "serial", "-n", "3", "-c", "dev.toml"]);
        assert_eq!(cli.command, Some(Commands::Serial { count: 3 }));
        assert_eq!(cli.config, "dev.toml");
    }

    #[test]
    fn test_parse_config_generate() {
        let cli = Cli::parse_from(["formsuite", "config", "generate", "out.toml"]);
        assert_eq!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Generate {
                    output: Some("out.toml".into())
                }
            })
        );
    }
}
