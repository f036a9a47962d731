use std::fmt;

const SYSTEM_PRINCIPAL: &str = "SYSTEM";
const ANONYMOUS_PRINCIPAL: &str = "anonymous";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Principal {
    name: String,
    system: bool,
}

impl Principal {
    pub fn user(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system: false,
        }
    }

    // Registry lookups run as this identity. It cannot be selected with `--as`.
    pub fn system() -> Self {
        Self {
            name: SYSTEM_PRINCIPAL.to_string(),
            system: true,
        }
    }

    pub fn anonymous() -> Self {
        Self::user(ANONYMOUS_PRINCIPAL)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_system(&self) -> bool {
        self.system
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Configure,
    Administer,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configure => f.write_str("configure"),
            Self::Administer => f.write_str("administer"),
        }
    }
}
