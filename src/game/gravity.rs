use super::*;
use serde::{Deserialize, Serialize};

/// G in N·m²/kg²
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11;

/// Entities closer than this (squared, m²) to a body's center feel nothing from it
const MIN_DISTANCE2: f64 = 1e-6;

/// A static point mass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GravityBody {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub mass_kg: f64,
    pub position: [f64; 3],
    /// Bodies only pull on entities strictly inside this distance (m). None means everywhere.
    pub influence_radius_m: Option<f64>,
    pub gravity_enabled: bool,
}

/// A gravity body as written in a scenario. The cutoff may be given in meters or kilometers.
#[derive(Debug, Clone, Deserialize)]
pub struct GravityBodySpec {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub mass_kg: f64,
    #[serde(default)]
    pub position: [f64; 3],
    #[serde(default)]
    pub gravity_radius_m: Option<f64>,
    #[serde(default)]
    pub cutoff_radius_km: Option<f64>,
    #[serde(default = "default_true")]
    pub gravity_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl GravityBody {
    pub fn new(id: &str, mass_kg: f64, position: Point3<f64>) -> Self {
        Self {
            id: id.to_string(),
            name: None,
            mass_kg,
            position: position.into(),
            influence_radius_m: None,
            gravity_enabled: true,
        }
    }

    pub fn from_spec(spec: GravityBodySpec) -> Result<Self, Box<dyn Error>> {
        if spec.id.trim().is_empty() {
            return Err("gravity body id must not be empty".into());
        }
        if !spec.mass_kg.is_finite() || spec.mass_kg < 0.0 {
            return Err(format!("gravity body {}: mass_kg must not be negative", spec.id).into());
        }
        let influence_radius_m = spec
            .gravity_radius_m
            .or_else(|| spec.cutoff_radius_km.map(|km| km * 1000.0));
        Ok(Self {
            id: spec.id,
            name: spec.name,
            mass_kg: spec.mass_kg,
            position: spec.position,
            influence_radius_m,
            gravity_enabled: spec.gravity_enabled,
        })
    }

    fn acceleration_at(&self, point: Point3<f64>) -> Option<Vector3<f64>> {
        if !self.gravity_enabled || self.mass_kg <= 0.0 {
            return None;
        }
        let offset = Point3::from(self.position) - point;
        let distance2 = offset.magnitude2();
        if distance2 <= MIN_DISTANCE2 {
            return None;
        }
        let distance = distance2.sqrt();
        if let Some(radius) = self.influence_radius_m {
            if radius <= distance {
                return None;
            }
        }
        Some(offset * (GRAVITATIONAL_CONSTANT * self.mass_kg / (distance2 * distance)))
    }
}

/// Summed inverse-square pull of every body at point
pub fn gravity_at(point: Point3<f64>, bodies: &[GravityBody]) -> Vector3<f64> {
    bodies
        .iter()
        .filter_map(|body| body.acceleration_at(point))
        .fold(Vector3::zero(), |total, accel| total + accel)
}
