//! Line-delimited JSON API over TCP. Network threads only decode; every request is applied by the engine thread.

use super::*;

mod connection_collection;
mod dispatch;
mod protocol;
mod request_decoder;
mod session;
mod tcp;

pub use connection_collection::{ConnectionCollection, ConnectionKey};
pub use dispatch::dispatch;
#[cfg(test)]
pub use protocol::ResponseStatus;
pub use protocol::{ApiError, ApiRequest, ApiResponse, API_VERSION};
pub use request_decoder::RequestDecoder;
pub use session::{InboundBundleHandler, Session, SessionBuilder};
pub use tcp::TcpListener;

use serde_json::{json, Map, Value};
use std::net::SocketAddr;
