pub mod blocktime;
pub mod client;
pub mod errors;
pub mod ranking;

mod wire;

pub use client::{find_validator, ChainClient, HttpChainClient};
pub use errors::{ChainError, Result};
