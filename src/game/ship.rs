use super::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_SHIP_MASS_KG: f64 = 1_000_000.0;

/// Per-ship capability limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhysicsCaps {
    pub max_main_thrust_newton: f64,
    pub max_rcs_yaw_deg_s: f64,
    pub max_rcs_pitch_deg_s: f64,
    pub max_rcs_roll_deg_s: f64,
    /// Lateral RCS is accepted and reported but not applied to motion
    pub max_rcs_linear_m_s2: f64,
}

impl Default for PhysicsCaps {
    fn default() -> Self {
        Self {
            max_main_thrust_newton: 1_000_000.0,
            max_rcs_yaw_deg_s: 10.0,
            max_rcs_pitch_deg_s: 10.0,
            max_rcs_roll_deg_s: 10.0,
            max_rcs_linear_m_s2: 1.0,
        }
    }
}

/// Physics block as written in a scenario. Pitch and roll caps default to the yaw cap.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PhysicsSpec {
    pub max_main_thrust_newton: Option<f64>,
    pub max_rcs_yaw_deg_s: Option<f64>,
    pub max_rcs_pitch_deg_s: Option<f64>,
    pub max_rcs_roll_deg_s: Option<f64>,
    pub max_rcs_linear_m_s2: Option<f64>,
}

impl PhysicsSpec {
    fn resolve(&self) -> PhysicsCaps {
        let defaults = PhysicsCaps::default();
        let yaw = self.max_rcs_yaw_deg_s.unwrap_or(defaults.max_rcs_yaw_deg_s).abs();
        PhysicsCaps {
            max_main_thrust_newton: self
                .max_main_thrust_newton
                .unwrap_or(defaults.max_main_thrust_newton),
            max_rcs_yaw_deg_s: yaw,
            max_rcs_pitch_deg_s: self.max_rcs_pitch_deg_s.unwrap_or(yaw).abs(),
            max_rcs_roll_deg_s: self.max_rcs_roll_deg_s.unwrap_or(yaw).abs(),
            max_rcs_linear_m_s2: self
                .max_rcs_linear_m_s2
                .unwrap_or(defaults.max_rcs_linear_m_s2),
        }
    }
}

/// How visible an entity is to sensors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Signature {
    pub base_radar: f64,
    pub base_thermal: f64,
}

impl Default for Signature {
    fn default() -> Self {
        Self {
            base_radar: 1.0,
            base_thermal: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassiveSensor {
    pub range_km: f64,
    pub fov_deg: f64,
    pub sensitivity: f64,
}

impl Default for PassiveSensor {
    fn default() -> Self {
        Self {
            range_km: 0.0,
            fov_deg: 360.0,
            sensitivity: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveSensor {
    pub range_km: f64,
    pub fov_deg: f64,
    pub ping_cooldown_s: f64,
}

impl Default for ActiveSensor {
    fn default() -> Self {
        Self {
            range_km: 0.0,
            fov_deg: 60.0,
            ping_cooldown_s: 5.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorSuite {
    pub passive: Option<PassiveSensor>,
    pub active: Option<ActiveSensor>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcmEccm {
    /// Reduces how strongly others detect this ship
    pub ecm_strength: f64,
    /// Boosts how strongly this ship detects others
    pub eccm_strength: f64,
}

/// Ship equipment read by sensors and external agents. Never touched by physics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Systems {
    pub sensors: SensorSuite,
    pub ecm_eccm: EcmEccm,
    /// Opaque to the server, kept for point-defence clients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_defense: Option<Value>,
}

impl Systems {
    /// The passive sensor, if it has any range
    pub fn passive_sensor(&self) -> Option<&PassiveSensor> {
        self.sensors.passive.as_ref().filter(|s| s.range_km > 0.0)
    }

    /// The active sensor, if it has any range
    pub fn active_sensor(&self) -> Option<&ActiveSensor> {
        self.sensors.active.as_ref().filter(|s| s.range_km > 0.0)
    }
}

/// Current helm state plus a tag naming whoever set it last
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Controls {
    pub helm: HelmInput,
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrientationSpec {
    pub yaw: Option<f64>,
    pub pitch: f64,
    pub roll: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AutopilotSpec {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub params: Value,
}

/// A ship record as it appears in a scenario file
#[derive(Debug, Clone, Deserialize)]
pub struct ShipSpec {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub is_player: bool,
    #[serde(default)]
    pub position: [f64; 3],
    #[serde(default)]
    pub velocity: [f64; 3],
    /// Legacy heading, used when orientation_euler_deg has no yaw
    #[serde(default)]
    pub orientation_deg: Option<f64>,
    #[serde(default)]
    pub orientation_euler_deg: Option<OrientationSpec>,
    #[serde(default = "default_mass")]
    pub mass_kg: f64,
    #[serde(default)]
    pub signature: Signature,
    #[serde(default)]
    pub controls: Value,
    #[serde(default)]
    pub physics: PhysicsSpec,
    #[serde(default)]
    pub autopilot: Option<AutopilotSpec>,
    #[serde(default)]
    pub current_target_id: Option<String>,
    #[serde(default)]
    pub systems: Systems,
}

fn default_mass() -> f64 {
    DEFAULT_SHIP_MASS_KG
}

#[derive(Debug, Clone)]
pub struct Ship {
    pub id: String,
    pub name: Option<String>,
    pub class: Option<String>,
    pub team: Option<String>,
    pub is_player: bool,
    pub position: Point3<f64>,
    pub velocity: Vector3<f64>,
    pub orientation: Orientation,
    pub mass_kg: f64,
    pub signature: Signature,
    pub controls: Controls,
    pub physics: PhysicsCaps,
    pub autopilot: Autopilot,
    /// Weak reference, may name an entity that no longer exists
    pub current_target_id: Option<String>,
    pub systems: Systems,
}

impl Ship {
    /// A stationary ship with default capabilities, mostly useful for building up test worlds
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: None,
            class: None,
            team: None,
            is_player: false,
            position: Point3::origin(),
            velocity: Vector3::zero(),
            orientation: Orientation::default(),
            mass_kg: DEFAULT_SHIP_MASS_KG,
            signature: Signature::default(),
            controls: Controls::default(),
            physics: PhysicsCaps::default(),
            autopilot: Autopilot::default(),
            current_target_id: None,
            systems: Systems::default(),
        }
    }

    /// Validates and normalizes a scenario record. This is the only place loosely-typed ship data is accepted.
    pub fn from_spec(spec: ShipSpec) -> Result<Self, Box<dyn Error>> {
        if spec.id.trim().is_empty() {
            return Err("ship id must not be empty".into());
        }
        if !(spec.mass_kg.is_finite() && spec.mass_kg > 0.0) {
            return Err(format!("ship {}: mass_kg must be greater than 0", spec.id).into());
        }
        let finite = |v: [f64; 3]| v.iter().all(|c| c.is_finite());
        if !finite(spec.position) || !finite(spec.velocity) {
            return Err(format!("ship {}: position and velocity must be finite", spec.id).into());
        }
        let euler = spec.orientation_euler_deg.unwrap_or_default();
        let yaw = euler.yaw.or(spec.orientation_deg).unwrap_or(0.0);
        let physics = spec.physics.resolve();
        let controls = match &spec.controls {
            Value::Object(map) => Controls {
                helm: HelmInput::from_json(
                    map.get("thrust_vector").unwrap_or(&Value::Null),
                    map.get("rotation_deg_s").unwrap_or(&Value::Null),
                )
                .normalized(&physics),
                mode: map.get("mode").and_then(Value::as_str).map(str::to_string),
            },
            _ => Controls::default(),
        };
        let autopilot = match spec.autopilot {
            Some(ap) => Autopilot::from_spec(&spec.id, ap),
            None => Autopilot::default(),
        };
        Ok(Self {
            id: spec.id,
            name: spec.name,
            class: spec.class,
            team: spec.team,
            is_player: spec.is_player,
            position: Point3::from(spec.position),
            velocity: Vector3::from(spec.velocity),
            orientation: Orientation::new(yaw, euler.pitch, euler.roll),
            mass_kg: spec.mass_kg,
            signature: spec.signature,
            controls,
            physics,
            autopilot,
            current_target_id: spec.current_target_id.filter(|id| !id.is_empty()),
            systems: spec.systems,
        })
    }

    /// Stores helm input after clamping it to this ship's limits
    pub fn set_helm(&mut self, helm: HelmInput, mode: Option<&str>) {
        self.controls.helm = helm.normalized(&self.physics);
        if let Some(mode) = mode {
            self.controls.mode = Some(mode.to_string());
        }
    }

    /// Largest forward acceleration the main drive can produce (m/s²)
    pub fn max_acceleration(&self) -> f64 {
        self.physics.max_main_thrust_newton / self.mass_kg.max(1.0)
    }
}
