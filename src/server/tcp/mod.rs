#![allow(dyn_drop)]

use super::*;

mod mio_poll_thread;
mod tcp_listener;
mod tcp_session;

pub use tcp_listener::TcpListener;

use mio_poll_thread::new_mio_poll_thread;
use tcp_session::TcpSessionBuilder;
