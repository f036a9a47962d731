use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlRequirement {
    scheme: Option<String>,
    host: Option<String>,
}

impl UrlRequirement {
    /// Blank or unparseable URLs yield an empty requirement that every scope satisfies.
    pub fn from_url(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::default();
        }

        let Ok(url) = Url::parse(raw) else {
            log::debug!("ignoring unparseable url `{raw}` for credential matching");
            return Self::default();
        };

        Self {
            scheme: Some(url.scheme().to_ascii_lowercase()),
            host: url.host_str().map(str::to_ascii_lowercase),
        }
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialScope {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hostnames: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
}

impl CredentialScope {
    pub fn matches(&self, requirement: &UrlRequirement) -> bool {
        if let Some(scheme) = requirement.scheme() {
            if !self.schemes.is_empty()
                && !self
                    .schemes
                    .iter()
                    .any(|allowed| allowed.trim().eq_ignore_ascii_case(scheme))
            {
                return false;
            }
        }

        if let Some(host) = requirement.host() {
            if !self.hostnames.is_empty()
                && !self
                    .hostnames
                    .iter()
                    .any(|pattern| host_matches(&pattern.trim().to_ascii_lowercase(), host))
            {
                return false;
            }
        }

        true
    }
}

/// Glob match where `*` stands for any run of characters.
fn host_matches(pattern: &str, host: &str) -> bool {
    let mut parts = pattern.split('*');
    let Some(first) = parts.next() else {
        return false;
    };
    let Some(mut rest) = host.strip_prefix(first) else {
        return false;
    };

    let remaining: Vec<&str> = parts.collect();
    let Some((last, middle)) = remaining.split_last() else {
        return rest.is_empty();
    };

    for part in middle {
        match rest.find(part) {
            Some(index) => rest = &rest[index + part.len()..],
            None => return false,
        }
    }

    rest.ends_with(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(hostnames: &[&str], schemes: &[&str]) -> CredentialScope {
        CredentialScope {
            hostnames: hostnames.iter().map(|s| s.to_string()).collect(),
            schemes: schemes.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn parses_scheme_and_host() {
        let requirement = UrlRequirement::from_url("HTTPS://Acme.JetBrains.Space/p/main");
        assert_eq!(requirement.scheme(), Some("https"));
        assert_eq!(requirement.host(), Some("acme.jetbrains.space"));
    }

    #[test]
    fn invalid_url_yields_empty_requirement() {
        assert_eq!(UrlRequirement::from_url("not a url"), UrlRequirement::default());
        assert_eq!(UrlRequirement::from_url("   "), UrlRequirement::default());
        assert!(scope(&["example.com"], &["https"]).matches(&UrlRequirement::from_url("???")));
    }

    #[test]
    fn unrestricted_scope_matches_anything() {
        let requirement = UrlRequirement::from_url("https://jetbrains.team");
        assert!(CredentialScope::default().matches(&requirement));
    }

    #[test]
    fn exact_hostname_must_match() {
        let scope = scope(&["jetbrains.team"], &[]);
        assert!(scope.matches(&UrlRequirement::from_url("https://JetBrains.team")));
        assert!(!scope.matches(&UrlRequirement::from_url("https://acme.jetbrains.team")));
    }

    #[test]
    fn wildcard_hostname_matches_subdomains() {
        let scope = scope(&["*.jetbrains.space"], &[]);
        assert!(scope.matches(&UrlRequirement::from_url("https://acme.jetbrains.space")));
        assert!(!scope.matches(&UrlRequirement::from_url("https://jetbrains.space.evil.com")));
    }

    #[test]
    fn scheme_restriction_applies() {
        let scope = scope(&[], &["https"]);
        assert!(scope.matches(&UrlRequirement::from_url("https://jetbrains.team")));
        assert!(!scope.matches(&UrlRequirement::from_url("http://jetbrains.team")));
    }

    #[test]
    fn glob_handles_inner_wildcards() {
        assert!(host_matches("space-*.example.*", "space-eu.example.com"));
        assert!(!host_matches("space-*.example.*", "git.example.com"));
        assert!(host_matches("*", "anything"));
    }
}
