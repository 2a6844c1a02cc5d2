use super::*;
use serde_json::{json, Map, Value};

/// Proportional gain on heading error (deg/s of rate per degree of error)
const HEADING_GAIN: f64 = 1.0;
/// kill_vel hands control back once slower than this (m/s)
const KILL_VEL_STOP_SPEED: f64 = 0.5;
/// kill_vel reaches full throttle at this many seconds worth of max acceleration
const KILL_VEL_FULL_THROTTLE_SECONDS: f64 = 5.0;
const DEFAULT_DESIRED_RANGE_M: f64 = 5_000.0;
const DEFAULT_MIN_RANGE_M: f64 = 1_000.0;

pub const AUTOPILOT_MODES: [&str; 4] = ["chase_target", "coast", "kill_vel", "manual"];

/// What the autopilot does each tick while enabled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AutopilotProgram {
    /// Leaves the helm alone
    Manual,
    /// Zero thrust and rotation
    Coast,
    /// Turns against the velocity vector and burns until nearly stopped
    KillVel,
    /// Closes on the ship's current target, easing off inside the desired range
    ChaseTarget {
        desired_range_m: f64,
        min_range_m: f64,
    },
}

impl AutopilotProgram {
    /// None if the mode is not one of AUTOPILOT_MODES
    pub fn parse(mode: &str, params: &Value) -> Option<Self> {
        match mode {
            "manual" => Some(Self::Manual),
            "coast" => Some(Self::Coast),
            "kill_vel" => Some(Self::KillVel),
            "chase_target" => Some(Self::ChaseTarget {
                desired_range_m: number_or(params.get("desired_range_m"), DEFAULT_DESIRED_RANGE_M),
                min_range_m: number_or(params.get("min_range_m"), DEFAULT_MIN_RANGE_M),
            }),
            _ => None,
        }
    }

    pub fn mode_name(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Coast => "coast",
            Self::KillVel => "kill_vel",
            Self::ChaseTarget { .. } => "chase_target",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Autopilot {
    pub enabled: bool,
    pub program: AutopilotProgram,
    /// Echoed back exactly as the client sent them
    pub params: Value,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            enabled: false,
            program: AutopilotProgram::Manual,
            params: Value::Object(Map::new()),
        }
    }
}

impl Autopilot {
    /// Returns None for an unknown mode. Manual is never enabled.
    pub fn configure(enabled: bool, mode: &str, params: Value) -> Option<Self> {
        let params = match params {
            Value::Object(_) => params,
            _ => json!({}),
        };
        let program = AutopilotProgram::parse(mode, &params)?;
        Some(Self {
            enabled: enabled && program != AutopilotProgram::Manual,
            program,
            params,
        })
    }

    /// Unknown modes in a scenario are not fatal, the ship just starts under manual control
    pub fn from_spec(ship_id: &str, spec: AutopilotSpec) -> Self {
        let mode = spec.mode.as_deref().unwrap_or("manual");
        match Self::configure(spec.enabled, mode, spec.params) {
            Some(autopilot) => autopilot,
            None => {
                warn!(
                    "ship {} has unknown autopilot mode {:?}, starting in manual",
                    ship_id, mode
                );
                Self::default()
            }
        }
    }

    pub fn mode_name(&self) -> &'static str {
        self.program.mode_name()
    }

    fn disengage(&mut self) {
        self.enabled = false;
        self.program = AutopilotProgram::Manual;
    }
}

/// The outcome of one autopilot evaluation for one ship
#[derive(Debug, Clone, PartialEq)]
enum AutopilotAction {
    Nothing,
    Steer { helm: HelmInput, tag: &'static str },
    /// Stop the engines and hand control back
    Complete { tag: &'static str },
    /// Hand control back without touching the helm
    Disengage,
}

/// Rotation rates that turn the nose toward direction and level the wings. Unclamped.
fn rates_toward(orientation: &Orientation, direction: Vector3<f64>) -> RotationRates {
    let yaw = direction.y.atan2(direction.x).to_degrees();
    let horizontal = direction.x.hypot(direction.y);
    let pitch = direction.z.atan2(horizontal).to_degrees();
    RotationRates::new(
        HEADING_GAIN * wrap_180(yaw - orientation.yaw),
        HEADING_GAIN * wrap_180(pitch - orientation.pitch),
        HEADING_GAIN * wrap_180(-orientation.roll),
    )
}

fn kill_vel(ship: &Ship) -> AutopilotAction {
    let speed = ship.velocity.magnitude();
    if speed < KILL_VEL_STOP_SPEED {
        return AutopilotAction::Complete {
            tag: "autopilot_kill_vel_complete",
        };
    }
    let full_throttle_speed = (ship.max_acceleration() * KILL_VEL_FULL_THROTTLE_SECONDS).max(1e-3);
    let throttle = (speed / full_throttle_speed).max(0.1).min(1.0);
    AutopilotAction::Steer {
        helm: HelmInput::new(
            [0.0, 0.0, throttle],
            rates_toward(&ship.orientation, -ship.velocity),
        ),
        tag: "autopilot_kill_vel",
    }
}

fn chase_target<F>(ship: &Ship, desired_range_m: f64, min_range_m: f64, locate: F) -> AutopilotAction
where
    F: Fn(&str) -> Option<Point3<f64>>,
{
    let target_id = match &ship.current_target_id {
        Some(id) => id,
        None => {
            debug!("chase_target: ship {} has no target, coasting", ship.id);
            return AutopilotAction::Steer {
                helm: HelmInput::idle(),
                tag: "autopilot_coast",
            };
        }
    };
    let target_position = match locate(target_id.as_str()) {
        Some(position) => position,
        None => {
            debug!(
                "chase_target: ship {} target {} is gone, disengaging",
                ship.id, target_id
            );
            return AutopilotAction::Disengage;
        }
    };
    let offset = target_position - ship.position;
    let range = offset.magnitude();
    let throttle = if range < min_range_m {
        0.0
    } else if range < desired_range_m {
        0.3
    } else {
        0.8
    };
    AutopilotAction::Steer {
        helm: HelmInput::new([0.0, 0.0, throttle], rates_toward(&ship.orientation, offset)),
        tag: "autopilot_chase_target",
    }
}

fn decide<F>(ship: &Ship, locate: F) -> AutopilotAction
where
    F: Fn(&str) -> Option<Point3<f64>>,
{
    if !ship.autopilot.enabled {
        return AutopilotAction::Nothing;
    }
    match ship.autopilot.program {
        AutopilotProgram::Manual => AutopilotAction::Nothing,
        AutopilotProgram::Coast => AutopilotAction::Steer {
            helm: HelmInput::idle(),
            tag: "autopilot_coast",
        },
        AutopilotProgram::KillVel => kill_vel(ship),
        AutopilotProgram::ChaseTarget {
            desired_range_m,
            min_range_m,
        } => chase_target(ship, desired_range_m, min_range_m, locate),
    }
}

/// Runs every enabled autopilot once. Must happen before physics so the integrator sees this tick's helm.
pub fn run_autopilot(ships: &mut [Ship], projectiles: &[Projectile]) {
    for i in 0..ships.len() {
        let action = {
            let ships = &*ships;
            decide(&ships[i], |id| {
                ships
                    .iter()
                    .find(|s| s.id == id)
                    .map(|s| s.position)
                    .or_else(|| projectiles.iter().find(|p| p.id == id).map(|p| p.position))
            })
        };
        let ship = &mut ships[i];
        match action {
            AutopilotAction::Nothing => (),
            AutopilotAction::Steer { helm, tag } => ship.set_helm(helm, Some(tag)),
            AutopilotAction::Complete { tag } => {
                ship.set_helm(HelmInput::idle(), Some(tag));
                ship.autopilot.disengage();
                info!(
                    "{} complete for {}, speed {:.3} m/s",
                    tag,
                    ship.id,
                    ship.velocity.magnitude()
                );
            }
            AutopilotAction::Disengage => ship.autopilot.disengage(),
        }
    }
}
