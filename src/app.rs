use crate::cli::{Cli, Command};
use crate::commands;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::logging;

pub async fn run(cli: Cli) -> AppResult<()> {
    let Cli {
        principal,
        json,
        verbose,
        command,
    } = cli;

    logging::init(verbose);
    let mut ctx = AppContext::bootstrap(principal.as_deref(), json)?;

    match command {
        Command::Connection(args) => commands::connection::run(&mut ctx, args.command).await,
        Command::Credential(args) => commands::credential::run(&ctx, args.command),
    }
}
