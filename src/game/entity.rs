use super::*;

/// Borrowed view over anything sensors can see or the autopilot can chase
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Ship(&'a Ship),
    Projectile(&'a Projectile),
}

impl<'a> EntityRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            Self::Ship(ship) => &ship.id,
            Self::Projectile(projectile) => &projectile.id,
        }
    }

    pub fn position(&self) -> Point3<f64> {
        match self {
            Self::Ship(ship) => ship.position,
            Self::Projectile(projectile) => projectile.position,
        }
    }

    pub fn signature(&self) -> Signature {
        match self {
            Self::Ship(ship) => ship.signature,
            Self::Projectile(projectile) => projectile.signature,
        }
    }

    /// Projectiles carry no jammers
    pub fn ecm_strength(&self) -> f64 {
        match self {
            Self::Ship(ship) => ship.systems.ecm_eccm.ecm_strength,
            Self::Projectile(_) => 0.0,
        }
    }
}

/// Ships first, then projectiles
pub fn all_entities<'a>(ships: &'a [Ship], projectiles: &'a [Projectile]) -> Vec<EntityRef<'a>> {
    ships
        .iter()
        .map(EntityRef::Ship)
        .chain(projectiles.iter().map(EntityRef::Projectile))
        .collect()
}
