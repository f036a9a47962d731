pub mod client;
pub mod probe;

pub use client::{SpaceApplication, SpaceClient};
pub use probe::{ConnectivityProbe, ProbeError, SpaceApiProbe};
