use std::fs;

use serde::Serialize;

use crate::cli::{
    AddApiCredentialArgs, AddSshCredentialArgs, CredentialCommand, CredentialKindArg,
    CredentialOptionsArgs, CredentialScopeArgs,
};
use crate::context::AppContext;
use crate::credentials::{
    Credential, CredentialDescriptor, CredentialKind, CredentialScope, CredentialSecret,
    LookupMode,
};
use crate::error::{AppError, AppResult};
use crate::security::{Capability, Principal};

pub fn run(ctx: &AppContext, command: CredentialCommand) -> AppResult<()> {
    match command {
        CredentialCommand::Ls => list(ctx),
        CredentialCommand::AddApi(args) => add_api(ctx, args),
        CredentialCommand::AddSsh(args) => add_ssh(ctx, args),
        CredentialCommand::Rm(args) => remove(ctx, &args.id),
        CredentialCommand::Options(args) => options(ctx, args),
    }
}

#[derive(Debug, Serialize)]
struct CredentialSummary {
    id: String,
    kind: CredentialKind,
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
    scope: CredentialScope,
}

impl From<Credential> for CredentialSummary {
    fn from(credential: Credential) -> Self {
        Self {
            kind: credential.kind(),
            label: credential.label(),
            id: credential.id,
            owner: credential.owner,
            scope: credential.scope,
        }
    }
}

fn list(ctx: &AppContext) -> AppResult<()> {
    ctx.require(Capability::Configure)?;

    let mode = LookupMode::Caller(&ctx.principal);
    let summaries: Vec<CredentialSummary> = ctx
        .credential_store
        .list()?
        .into_iter()
        .filter(|credential| mode.can_see(credential))
        .map(CredentialSummary::from)
        .collect();

    ctx.output
        .emit_list(&summaries, "0 credentials", |_, summary| {
            let owner = summary
                .owner
                .as_deref()
                .map(|owner| format!(" (owner: {owner})"))
                .unwrap_or_default();
            format!("{} [{}] {}{owner}", summary.id, summary.kind, summary.label)
        })
}

fn add_api(ctx: &AppContext, args: AddApiCredentialArgs) -> AppResult<()> {
    ctx.require(Capability::Configure)?;

    let secret = CredentialSecret::ApiToken {
        client_id: required("--client-id", args.client_id)?,
        client_secret: required_secret("--client-secret", args.client_secret)?,
    };
    save(ctx, args.id, args.scope, secret)
}

fn add_ssh(ctx: &AppContext, args: AddSshCredentialArgs) -> AppResult<()> {
    ctx.require(Capability::Configure)?;

    let private_key = fs::read_to_string(&args.key_file)?;
    if private_key.trim().is_empty() {
        return Err(AppError::InvalidInput(format!(
            "private key file {} is empty",
            args.key_file.display()
        )));
    }

    let secret = CredentialSecret::SshPrivateKey {
        username: required("--username", args.username)?,
        private_key,
        passphrase: args.passphrase.filter(|value| !value.is_empty()),
    };
    save(ctx, args.id, args.scope, secret)
}

fn save(
    ctx: &AppContext,
    id: String,
    scope: CredentialScopeArgs,
    secret: CredentialSecret,
) -> AppResult<()> {
    let credential = Credential {
        id: required("--id", id)?,
        description: scope.description.filter(|value| !value.trim().is_empty()),
        owner: scope.owner.filter(|value| !value.trim().is_empty()),
        scope: CredentialScope {
            hostnames: scope.hosts,
            schemes: scope.schemes,
        },
        secret,
    };

    let descriptor = credential.descriptor();
    let kind = credential.kind();
    ctx.credential_store.save(credential)?;

    let text = format!("saved {kind} credential {}", descriptor.id);
    ctx.output.emit(&text, &descriptor)
}

fn remove(ctx: &AppContext, id: &str) -> AppResult<()> {
    ctx.require(Capability::Configure)?;

    let credential = ctx
        .credential_store
        .list()?
        .into_iter()
        .find(|credential| credential.id == id)
        .ok_or_else(|| AppError::InvalidInput(format!("unknown credential `{id}`")))?;
    if owned_by_someone_else(&credential, &ctx.principal) {
        ctx.require(Capability::Administer)?;
    }

    ctx.credential_store.remove(id)?;
    let text = format!("removed credential {id}");
    ctx.output
        .emit(&text, &serde_json::json!({ "id": id, "removed": true }))
}

fn owned_by_someone_else(credential: &Credential, principal: &Principal) -> bool {
    credential
        .owner
        .as_deref()
        .is_some_and(|owner| owner != principal.name())
}

fn options(ctx: &AppContext, args: CredentialOptionsArgs) -> AppResult<()> {
    let descriptors: Vec<CredentialDescriptor> = match args.kind {
        CredentialKindArg::Api => ctx
            .registry
            .list_matching_api_credentials(&args.base_url, &ctx.principal)?
            .collect(),
        CredentialKindArg::Ssh => ctx
            .registry
            .list_matching_ssh_credentials(&args.base_url, &ctx.principal)?
            .collect(),
    };

    let empty = format!("no matching credentials for {}", args.base_url);
    ctx.output.emit_list(&descriptors, &empty, |_, descriptor| {
        format!("{}\t{}", descriptor.id, descriptor.label)
    })
}

fn required(flag: &str, value: String) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(format!("{flag} must not be blank")));
    }

    Ok(trimmed.to_string())
}

// Secret material is stored exactly as given.
fn required_secret(flag: &str, value: String) -> AppResult<String> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{flag} must not be blank")));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(owner: Option<&str>) -> Credential {
        Credential {
            id: "api-1".to_string(),
            description: None,
            owner: owner.map(ToOwned::to_owned),
            scope: CredentialScope::default(),
            secret: CredentialSecret::ApiToken {
                client_id: "client".to_string(),
                client_secret: "secret".to_string(),
            },
        }
    }

    #[test]
    fn secrets_keep_surrounding_whitespace() {
        let secret = required_secret("--client-secret", " s3cret \t".to_string())
            .expect("secret should be accepted");
        assert_eq!(secret, " s3cret \t");
        assert!(matches!(
            required_secret("--client-secret", "  ".to_string()),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn identifiers_are_trimmed() {
        let id = required("--client-id", "  client ".to_string()).expect("id should be accepted");
        assert_eq!(id, "client");
    }

    #[test]
    fn removing_another_principals_credential_needs_administer() {
        let alice = Principal::user("alice");
        assert!(owned_by_someone_else(&owned(Some("bob")), &alice));
        assert!(!owned_by_someone_else(&owned(Some("alice")), &alice));
        assert!(!owned_by_someone_else(&owned(None), &alice));
    }
}
