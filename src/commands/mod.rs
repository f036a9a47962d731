pub mod connection;
pub mod credential;
