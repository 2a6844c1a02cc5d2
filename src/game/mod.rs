//! All game logic belongs in this module, including ships, physics, sensors, etc

use super::*;

mod autopilot;
mod commands;
mod entity;
mod gravity;
mod helm;
mod orientation;
mod physics;
mod projectile;
mod scenario;
mod sensors;
mod ship;
mod snapshot;
mod world;

pub use autopilot::{run_autopilot, Autopilot, AUTOPILOT_MODES};
pub use commands::{CommandError, StateQuery};
pub use entity::{all_entities, EntityRef};
pub use gravity::{gravity_at, GravityBody, GravityBodySpec};
pub use helm::{number_or, HelmInput};
#[cfg(test)]
pub use orientation::MAX_PITCH_DEG;
pub use orientation::{wrap_180, wrap_360, Orientation, RotationRates};
pub use physics::{integrate_projectiles, integrate_ship};
pub use projectile::Projectile;
#[cfg(test)]
pub use projectile::TORPEDO_TTL_S;
#[cfg(test)]
pub use scenario::parse_scenario;
pub use scenario::{load_scenario, Scenario, ScenarioInfo};
pub use sensors::{
    Contact, DetectionKind, SensorEvent, SensorEventKind, SensorTuning, SensorsManager,
};
pub use ship::*;
pub use snapshot::{
    AutopilotRecord, ControlsRecord, EntitiesRecord, ProjectileRecord, ShipRecord, StateSnapshot,
};
pub use world::World;
