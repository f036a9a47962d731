use serde::Serialize;

use crate::cli::{ConnectionAddArgs, ConnectionCommand, ConnectionTestArgs};
use crate::connection::{ConnectionCheck, ConnectionProfile};
use crate::connection::check::ConnectionCheckView;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::security::Capability;

pub async fn run(ctx: &mut AppContext, command: ConnectionCommand) -> AppResult<()> {
    match command {
        ConnectionCommand::Add(args) => add(ctx, args),
        ConnectionCommand::Ls => list(ctx),
        ConnectionCommand::Get(args) => {
            let profile = find(ctx, &args.id)?;
            let text = format_profile(&profile);
            ctx.output.emit(&text, &profile)
        }
        ConnectionCommand::Test(args) => test(ctx, args).await,
    }
}

fn add(ctx: &mut AppContext, args: ConnectionAddArgs) -> AppResult<()> {
    ctx.require(Capability::Configure)?;

    let profile = ctx.registry.create_profile(
        args.id.as_deref(),
        &args.name,
        &args.base_url,
        &args.api_credential,
        &args.ssh_credential,
    );
    ctx.persist_connections()?;

    let text = format!("added connection {} ({})", profile.id(), profile.name());
    ctx.output.emit(&text, &profile)
}

fn list(ctx: &AppContext) -> AppResult<()> {
    let profiles = ctx.registry.profiles();
    ctx.output
        .emit_list(&profiles, "0 connections", |index, profile| {
            format!(
                "{}. {}\n   name: {}\n   url: {}",
                index + 1,
                profile.id(),
                display_or_dash(profile.name()),
                display_or_dash(profile.base_url()),
            )
        })
}

#[derive(Debug, Serialize)]
struct TestReport {
    connection: Option<String>,
    base_url: String,
    api_credential_id: String,
    #[serde(flatten)]
    check: ConnectionCheckView,
}

async fn test(ctx: &AppContext, args: ConnectionTestArgs) -> AppResult<()> {
    let (connection, base_url, api_credential_id) =
        match (args.id, args.base_url, args.api_credential) {
            (Some(id), _, _) => {
                let profile = find(ctx, &id)?;
                (
                    Some(id),
                    profile.base_url().to_string(),
                    profile.api_credential_id().to_string(),
                )
            }
            (None, Some(base_url), Some(api_credential_id)) => (None, base_url, api_credential_id),
            _ => {
                return Err(AppError::InvalidInput(
                    "pass a connection id, or both --base-url and --api-credential".to_string(),
                ));
            }
        };

    let check = ctx
        .registry
        .test_connection(&base_url, &api_credential_id, &ctx.principal)
        .await?;

    let text = match check.error() {
        None => format!("{base_url}: connection ok"),
        Some(err) => format!("{base_url}: {err}"),
    };
    let report = TestReport {
        connection,
        base_url,
        api_credential_id,
        check: check.view(),
    };
    ctx.output.emit(&text, &report)?;

    match check {
        ConnectionCheck::Ok => Ok(()),
        ConnectionCheck::Error(err) => Err(err.into()),
    }
}

fn find(ctx: &AppContext, id: &str) -> AppResult<ConnectionProfile> {
    ctx.registry.find_profile(id).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "unknown connection `{id}`; run `space-connect connection ls` to inspect connections"
        ))
    })
}

fn format_profile(profile: &ConnectionProfile) -> String {
    format!(
        "{}\n   name: {}\n   url: {}\n   api credential: {}\n   ssh credential: {}",
        profile.id(),
        display_or_dash(profile.name()),
        display_or_dash(profile.base_url()),
        display_or_dash(profile.api_credential_id()),
        display_or_dash(profile.ssh_credential_id()),
    )
}

fn display_or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_profile_with_placeholders() {
        let profile = ConnectionProfile::new(Some("p1"), "Space Prod", "https://x", "api-1", "");
        let text = format_profile(&profile);
        assert!(text.starts_with("p1\n"));
        assert!(text.contains("api credential: api-1"));
        assert!(text.contains("ssh credential: -"));
    }
}
