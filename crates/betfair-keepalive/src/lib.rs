//! Betfair identity keep-alive
//!
//! One authenticated round trip that extends a session and may rotate its
//! token. A call moves through four checks, each with its own failure kind:
//!
//! 1. `transport::post` sends the request and times it (`Error::Transport`)
//! 2. `status::check_status_code` rejects non-2xx responses (`Error::Status`)
//! 3. `decode::decode` parses the body into a JSON object (`Error::InvalidResponse`)
//! 4. `classify::classify` requires `status == "SUCCESS"` (`Error::KeepAlive`)
//!
//! Only after all four pass is the new token written to `SessionState`.
//! Nothing is retried here; `Error::requires_login()` tells the caller
//! whether retrying can help.

pub mod classify;
pub mod decode;
pub mod endpoint;
pub mod error;
pub mod metrics;
pub mod resource;
pub mod status;
pub mod transport;

pub use endpoint::KeepAlive;
pub use error::{Error, FailureKind, Result};
pub use resource::KeepAliveResource;
