//! Coercion of loosely-typed helm input into the values the integrator consumes

use super::*;
use serde_json::Value;

/// Reads a JSON number, treating anything else (missing, non-numeric, NaN, infinite) as fallback
pub fn number_or(value: Option<&Value>, fallback: f64) -> f64 {
    match value.and_then(Value::as_f64) {
        Some(n) if n.is_finite() => n,
        _ => fallback,
    }
}

/// Throttle along ship-local axes plus rotation rates. Index 2 of thrust is the main drive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HelmInput {
    pub thrust: [f64; 3],
    pub rotation: RotationRates,
}

impl HelmInput {
    pub fn new(thrust: [f64; 3], rotation: RotationRates) -> Self {
        Self { thrust, rotation }
    }

    /// Zero thrust and zero rotation
    pub fn idle() -> Self {
        Self::default()
    }

    /// Coerces a thrust vector from JSON: exactly 3 components, missing or non-numeric ones become 0 and extras are
    /// dropped. A non-array becomes all zeros.
    pub fn thrust_from_json(value: &Value) -> [f64; 3] {
        let mut thrust = [0.0; 3];
        if let Some(items) = value.as_array() {
            for (slot, item) in thrust.iter_mut().zip(items) {
                *slot = number_or(Some(item), 0.0);
            }
        }
        thrust
    }

    /// Coerces rotation input: a bare number is a yaw rate, an object may carry yaw, pitch and roll. Anything else
    /// is no rotation.
    pub fn rotation_from_json(value: &Value) -> RotationRates {
        match value {
            Value::Number(_) => RotationRates::new(number_or(Some(value), 0.0), 0.0, 0.0),
            Value::Object(map) => RotationRates::new(
                number_or(map.get("yaw"), 0.0),
                number_or(map.get("pitch"), 0.0),
                number_or(map.get("roll"), 0.0),
            ),
            _ => RotationRates::default(),
        }
    }

    pub fn from_json(thrust: &Value, rotation: &Value) -> Self {
        Self::new(
            Self::thrust_from_json(thrust),
            Self::rotation_from_json(rotation),
        )
    }

    /// Clamps thrust to [-1, 1] and each rotation axis to the ship's RCS cap
    pub fn normalized(&self, caps: &PhysicsCaps) -> Self {
        let clamp_unit = |t: f64| if t.is_finite() { t.max(-1.0).min(1.0) } else { 0.0 };
        let clamp_rate = |rate: f64, cap: f64| {
            let cap = cap.abs();
            if rate.is_finite() {
                rate.max(-cap).min(cap)
            } else {
                0.0
            }
        };
        Self {
            thrust: [
                clamp_unit(self.thrust[0]),
                clamp_unit(self.thrust[1]),
                clamp_unit(self.thrust[2]),
            ],
            rotation: RotationRates::new(
                clamp_rate(self.rotation.yaw, caps.max_rcs_yaw_deg_s),
                clamp_rate(self.rotation.pitch, caps.max_rcs_pitch_deg_s),
                clamp_rate(self.rotation.roll, caps.max_rcs_roll_deg_s),
            ),
        }
    }
}
