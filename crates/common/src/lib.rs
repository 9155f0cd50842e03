//! Types shared by the keep-alive crates and the daemon

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
