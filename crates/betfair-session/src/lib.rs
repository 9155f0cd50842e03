//! Client session state for the Betfair identity service
//!
//! Holds what every authenticated call needs: the application key, the
//! current session token, the identity base URI and the shared HTTP
//! connection pool. Endpoints read it to build requests and write the
//! token back when the service rotates it.
//!
//! The handle is meant to be shared as `Arc<SessionState>`. Token writes are
//! serialized by a mutex; concurrent writers get last-write-wins.

pub mod constants;
pub mod error;
pub mod state;

pub use constants::*;
pub use error::{Error, Result};
pub use state::SessionState;
