pub mod client;
pub mod encoding;
pub mod error;
pub mod protocol;
pub mod transport;

// Re-export for callers building parameter maps
pub use serde_json;

pub mod prelude {
    pub use crate::client::{RestClient, RestRequest};
    pub use crate::error::{ApiError, Error, Result};
    pub use crate::protocol::{Params, Response, TransportOptions};
    pub use crate::transport::{HttpTransport, Transport, TransportConfig};
}
