//! Passive and active detection, the contact lifecycle and the sensor event log

use super::*;

mod contact;
mod detection;
mod sensor_event;
mod sensors_manager;

pub use contact::{Contact, DetectionKind};
pub use detection::{detection_strength, range_and_bearing, within_fov};
pub use sensor_event::{SensorEvent, SensorEventKind};
pub use sensors_manager::SensorsManager;

use detection::*;

/// How long contacts live without being refreshed, and how strong a return must be to count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorTuning {
    /// Seconds since last detection before a contact is marked stale
    pub stale_after: f64,
    /// Seconds since last detection before a contact is dropped
    pub drop_after: f64,
    pub min_strength: f64,
}

impl Default for SensorTuning {
    fn default() -> Self {
        Self {
            stale_after: 5.0,
            drop_after: 10.0,
            min_strength: 0.05,
        }
    }
}
