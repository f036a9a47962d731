pub mod authorizer;
pub mod principal;

pub use authorizer::{AuthorizationChecker, PolicyAuthorizer};
pub use principal::{Capability, Principal};
