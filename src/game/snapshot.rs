//! Plain records handed to the protocol layer. Vectors become [x, y, z] arrays and the legacy scalar heading is
//! derived from the canonical orientation here.

use super::*;
use serde::Serialize;
use serde_json::Value;

fn array(v: Vector3<f64>) -> [f64; 3] {
    v.into()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlsRecord {
    pub thrust_vector: [f64; 3],
    pub rotation_deg_s: RotationRates,
    pub mode: Option<String>,
}

impl From<&Controls> for ControlsRecord {
    fn from(controls: &Controls) -> Self {
        Self {
            thrust_vector: controls.helm.thrust,
            rotation_deg_s: controls.helm.rotation,
            mode: controls.mode.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutopilotRecord {
    pub enabled: bool,
    pub mode: &'static str,
    pub params: Value,
}

impl From<&Autopilot> for AutopilotRecord {
    fn from(autopilot: &Autopilot) -> Self {
        Self {
            enabled: autopilot.enabled,
            mode: autopilot.mode_name(),
            params: autopilot.params.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipRecord {
    pub id: String,
    pub name: Option<String>,
    pub class: Option<String>,
    pub team: Option<String>,
    pub is_player: bool,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    pub orientation_deg: f64,
    pub orientation_euler_deg: Orientation,
    pub mass_kg: f64,
    pub signature: Signature,
    pub controls: ControlsRecord,
    pub physics: PhysicsCaps,
    pub autopilot: AutopilotRecord,
    pub current_target_id: Option<String>,
    pub systems: Systems,
}

impl From<&Ship> for ShipRecord {
    fn from(ship: &Ship) -> Self {
        Self {
            id: ship.id.clone(),
            name: ship.name.clone(),
            class: ship.class.clone(),
            team: ship.team.clone(),
            is_player: ship.is_player,
            position: ship.position.into(),
            velocity: array(ship.velocity),
            orientation_deg: ship.orientation.heading_deg(),
            orientation_euler_deg: ship.orientation,
            mass_kg: ship.mass_kg,
            signature: ship.signature,
            controls: (&ship.controls).into(),
            physics: ship.physics,
            autopilot: (&ship.autopilot).into(),
            current_target_id: ship.current_target_id.clone(),
            systems: ship.systems.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub team: Option<String>,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    pub mass_kg: f64,
    pub ttl: f64,
    pub signature: Signature,
}

impl From<&Projectile> for ProjectileRecord {
    fn from(projectile: &Projectile) -> Self {
        Self {
            id: projectile.id.clone(),
            kind: projectile.kind.clone(),
            team: projectile.team.clone(),
            position: projectile.position.into(),
            velocity: array(projectile.velocity),
            mass_kg: projectile.mass_kg,
            ttl: projectile.ttl,
            signature: projectile.signature,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitiesRecord {
    pub ships: Vec<ShipRecord>,
    pub projectiles: Vec<ProjectileRecord>,
}

/// What get_state returns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSnapshot {
    pub server_time: f64,
    pub own_ship: Option<ShipRecord>,
    pub contacts: Vec<Contact>,
    pub projectiles: Vec<ProjectileRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<EntitiesRecord>,
}
