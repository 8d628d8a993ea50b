use std::process::ExitCode;

use clap::Parser;
use mini_serve::{Server, ServerConfig, shutdown_signal};
use tracing::error;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::parse();

    let subscriber = FmtSubscriber::builder().with_max_level(config.log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {e}");
        return ExitCode::FAILURE;
    }

    let server = match Server::from_config(&config) {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "build server error");
            return ExitCode::FAILURE;
        }
    };

    match server.start(shutdown_signal()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(cause = %e, "server exited with error");
            ExitCode::FAILURE
        }
    }
}
