//! Random fox API client.

mod client;
mod dto;

pub use client::{DEFAULT_API_URL, RandomFoxClient};
pub(crate) use client::map_transport_error;
#[cfg(test)]
pub(crate) use client::test_server;
