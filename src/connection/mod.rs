pub mod check;
pub mod profile;
pub mod registry;

pub use check::{ConnectionCheck, ConnectionError, ConnectionFailure};
pub use profile::ConnectionProfile;
pub use registry::ConnectionRegistry;
