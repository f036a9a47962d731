pub mod credential;
pub mod file_store;
pub mod matching;
pub mod store;

pub use credential::{
    ApiCredential, Credential, CredentialDescriptor, CredentialKind, CredentialSecret,
};
pub use file_store::FileCredentialStore;
pub use matching::{CredentialScope, UrlRequirement};
pub use store::{CredentialStore, LookupMode};
