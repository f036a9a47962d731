use crate::security::Principal;

use super::Settings;

pub fn resolve_principal(requested: Option<&str>, settings: &Settings) -> Principal {
    let explicit = requested.map(str::trim).filter(|name| !name.is_empty());
    let configured = settings
        .default_principal
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());

    match explicit.or(configured) {
        Some(name) => Principal::user(name),
        None => Principal::anonymous(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_principal_wins() {
        let settings = Settings {
            default_principal: Some("ci-admin".to_string()),
            ..Settings::default()
        };
        assert_eq!(resolve_principal(Some("alice"), &settings).name(), "alice");
    }

    #[test]
    fn falls_back_to_configured_then_anonymous() {
        let mut settings = Settings {
            default_principal: Some("ci-admin".to_string()),
            ..Settings::default()
        };
        assert_eq!(resolve_principal(Some("  "), &settings).name(), "ci-admin");

        settings.default_principal = None;
        assert_eq!(resolve_principal(None, &settings), Principal::anonymous());
    }
}
