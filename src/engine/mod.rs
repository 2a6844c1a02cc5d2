//! The engine thread: owns the world, ticks it on a fixed period and applies client requests in between ticks

use super::*;

#[allow(clippy::module_inception)]
mod engine;
mod inbound;

pub use engine::Engine;
pub use inbound::Inbound;
