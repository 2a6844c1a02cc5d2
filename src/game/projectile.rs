use super::*;

pub const TORPEDO_MASS_KG: f64 = 100.0;
/// Seconds a projectile lives before it is removed
pub const TORPEDO_TTL_S: f64 = 300.0;
pub const TORPEDO_SIGNATURE: Signature = Signature {
    base_radar: 0.3,
    base_thermal: 0.5,
};

/// An unpowered round. Moves under gravity only and expires after its ttl.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: String,
    pub kind: String,
    pub team: Option<String>,
    pub position: Point3<f64>,
    pub velocity: Vector3<f64>,
    pub mass_kg: f64,
    /// Seconds remaining
    pub ttl: f64,
    pub signature: Signature,
}

impl Projectile {
    /// A torpedo with the standard mass, lifetime and signature
    pub fn new(
        id: String,
        team: Option<String>,
        position: Point3<f64>,
        velocity: Vector3<f64>,
    ) -> Self {
        Self {
            id,
            kind: "torpedo".to_string(),
            team,
            position,
            velocity,
            mass_kg: TORPEDO_MASS_KG,
            ttl: TORPEDO_TTL_S,
            signature: TORPEDO_SIGNATURE,
        }
    }
}
