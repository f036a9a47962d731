pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod connection;
pub mod context;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod output;
pub mod security;

use cli::Cli;
use error::AppResult;

pub async fn run(cli: Cli) -> AppResult<()> {
    app::run(cli).await
}
