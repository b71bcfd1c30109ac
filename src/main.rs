use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match estat_sync::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(exit_code = err.exit_code(), "{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
