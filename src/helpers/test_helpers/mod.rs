use super::*;

use std::{
    any::Any,
    ops::Deref,
    path::Path,
    sync::mpsc::RecvTimeoutError::{Disconnected, Timeout},
    thread,
};

mod attempt_any_to_string;
mod mock_filesystem;
mod mock_inbound_handler;
mod mock_session;
mod provision_socket;
mod run_with_timeout;

pub use attempt_any_to_string::*;
pub use mock_filesystem::*;
pub use mock_inbound_handler::*;
pub use mock_session::*;
pub use provision_socket::*;
pub use run_with_timeout::*;
