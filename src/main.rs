use clap::Parser;

use formsuite::cli::{Cli, Commands};
use formsuite::config::{get_config, init_config_from};
use formsuite::runtime::modes;
use formsuite::system::logging::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config_from(&cli.config);
    let config = get_config();

    match cli.command {
        None | Some(Commands::Serve) => {
            let _guard = init_logging(&config.logging)?;
            modes::run_server().await
        }
        Some(command) => {
            if let Err(e) = modes::run_cli(command) {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
