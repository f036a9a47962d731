use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "space-connect",
    version,
    about = "Manage JetBrains Space connections"
)]
pub struct Cli {
    #[arg(
        long = "as",
        global = true,
        value_name = "PRINCIPAL",
        help = "Principal to act as"
    )]
    pub principal: Option<String>,
    #[arg(long, global = true, help = "Emit JSON output")]
    pub json: bool,
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Verbose logging")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Connection(ConnectionArgs),
    Credential(CredentialArgs),
}

#[derive(Debug, Args)]
pub struct ConnectionArgs {
    #[command(subcommand)]
    pub command: ConnectionCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConnectionCommand {
    Add(ConnectionAddArgs),
    Ls,
    Get(ConnectionGetArgs),
    Test(ConnectionTestArgs),
}

#[derive(Debug, Args)]
pub struct ConnectionAddArgs {
    #[arg(long, help = "Connection id (generated when omitted)")]
    pub id: Option<String>,
    #[arg(long, help = "Display name")]
    pub name: String,
    #[arg(long, help = "Space organization URL")]
    pub base_url: String,
    #[arg(long, help = "Id of the API token credential")]
    pub api_credential: String,
    #[arg(long, help = "Id of the SSH private key credential")]
    pub ssh_credential: String,
}

#[derive(Debug, Args)]
pub struct ConnectionGetArgs {
    #[arg(help = "Connection id")]
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ConnectionTestArgs {
    #[arg(
        help = "Connection id to test",
        conflicts_with_all = ["base_url", "api_credential"],
        required_unless_present_all = ["base_url", "api_credential"]
    )]
    pub id: Option<String>,
    #[arg(long, requires = "api_credential", help = "Space organization URL")]
    pub base_url: Option<String>,
    #[arg(long, requires = "base_url", help = "Id of the API token credential")]
    pub api_credential: Option<String>,
}

#[derive(Debug, Args)]
pub struct CredentialArgs {
    #[command(subcommand)]
    pub command: CredentialCommand,
}

#[derive(Debug, Subcommand)]
pub enum CredentialCommand {
    Ls,
    AddApi(AddApiCredentialArgs),
    AddSsh(AddSshCredentialArgs),
    Rm(CredentialRmArgs),
    Options(CredentialOptionsArgs),
}

#[derive(Debug, Args)]
pub struct CredentialScopeArgs {
    #[arg(long, help = "Credential description")]
    pub description: Option<String>,
    #[arg(long = "host", action = ArgAction::Append, help = "Hostname pattern (repeatable, `*` wildcard)")]
    pub hosts: Vec<String>,
    #[arg(long = "scheme", action = ArgAction::Append, help = "Allowed URL scheme (repeatable)")]
    pub schemes: Vec<String>,
    #[arg(long, help = "Restrict the credential to one principal")]
    pub owner: Option<String>,
}

#[derive(Debug, Args)]
pub struct AddApiCredentialArgs {
    #[arg(long, help = "Credential id")]
    pub id: String,
    #[arg(long, help = "Space application client id")]
    pub client_id: String,
    #[arg(long, help = "Space application client secret")]
    pub client_secret: String,
    #[command(flatten)]
    pub scope: CredentialScopeArgs,
}

#[derive(Debug, Args)]
pub struct AddSshCredentialArgs {
    #[arg(long, help = "Credential id")]
    pub id: String,
    #[arg(long, help = "SSH username")]
    pub username: String,
    #[arg(long, help = "Read private key from file")]
    pub key_file: PathBuf,
    #[arg(long, help = "Private key passphrase")]
    pub passphrase: Option<String>,
    #[command(flatten)]
    pub scope: CredentialScopeArgs,
}

#[derive(Debug, Args)]
pub struct CredentialRmArgs {
    #[arg(help = "Credential id")]
    pub id: String,
}

#[derive(Debug, Args)]
pub struct CredentialOptionsArgs {
    #[arg(value_enum, help = "Credential kind to list")]
    pub kind: CredentialKindArg,
    #[arg(long, help = "Space organization URL the credential must match")]
    pub base_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CredentialKindArg {
    Api,
    Ssh,
}
