//! The operations clients use to change and inspect the world

use super::*;
use serde_json::Value;
use std::fmt;

/// Muzzle velocity added along the firing ship's nose (m/s)
pub const MUZZLE_VELOCITY: f64 = 2000.0;

#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    UnknownShip { ship_id: String },
    InvalidMode { ship_id: String, mode: String },
}

impl CommandError {
    /// The machine-readable code clients see
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownShip { .. } => "unknown_ship",
            Self::InvalidMode { .. } => "invalid_mode",
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::UnknownShip { ship_id } => write!(f, "unknown ship {:?}", ship_id),
            Self::InvalidMode { ship_id, mode } => write!(
                f,
                "invalid autopilot mode {:?} for ship {:?} (expected one of {})",
                mode,
                ship_id,
                AUTOPILOT_MODES.join(", ")
            ),
        }
    }
}

impl Error for CommandError {}

/// Arguments to get_state. With no ship_id the first ship is used.
#[derive(Debug, Clone, PartialEq)]
pub struct StateQuery {
    pub ship_id: Option<String>,
    pub include_contacts: bool,
    pub include_projectiles: bool,
    pub include_raw_entities: bool,
}

impl Default for StateQuery {
    fn default() -> Self {
        Self {
            ship_id: None,
            include_contacts: true,
            include_projectiles: true,
            include_raw_entities: false,
        }
    }
}

fn unknown_ship(ship_id: &str) -> CommandError {
    warn!("command for unknown ship {:?}", ship_id);
    CommandError::UnknownShip {
        ship_id: ship_id.to_string(),
    }
}

impl World {
    fn command_ship(&mut self, ship_id: &str) -> Result<&mut Ship, CommandError> {
        match self.ship_mut(ship_id) {
            Some(ship) => Ok(ship),
            None => Err(unknown_ship(ship_id)),
        }
    }

    /// Spawns a torpedo at the ship, moving at the ship's velocity plus MUZZLE_VELOCITY along its nose. Returns
    /// the new projectile's ID.
    pub fn fire_weapon(&mut self, ship_id: &str, mount_id: &str) -> Result<String, CommandError> {
        let ship = self.ship(ship_id).ok_or_else(|| unknown_ship(ship_id))?;
        let position = ship.position;
        let velocity = ship.velocity + ship.orientation.forward() * MUZZLE_VELOCITY;
        let team = ship.team.clone();
        let id = self.take_projectile_id(ship_id);
        info!("{} fired {}, spawned projectile {}", ship_id, mount_id, id);
        self.projectiles
            .push(Projectile::new(id.clone(), team, position, velocity));
        Ok(id)
    }

    /// Stores the target ID as given. It is not required to exist.
    pub fn set_target(&mut self, ship_id: &str, target_id: &str) -> Result<(), CommandError> {
        let ship = self.command_ship(ship_id)?;
        info!("{} now targeting {:?}", ship_id, target_id);
        ship.current_target_id = Some(target_id.to_string());
        Ok(())
    }

    /// Replaces the ship's autopilot. A missing mode means manual, which is never enabled.
    pub fn set_autopilot_mode(
        &mut self,
        ship_id: &str,
        enabled: bool,
        mode: Option<&str>,
        params: Value,
    ) -> Result<&Autopilot, CommandError> {
        let mode = mode.unwrap_or("manual");
        let ship = self.command_ship(ship_id)?;
        let autopilot = match Autopilot::configure(enabled, mode, params) {
            Some(autopilot) => autopilot,
            None => {
                warn!("invalid autopilot mode {:?} for {}", mode, ship_id);
                return Err(CommandError::InvalidMode {
                    ship_id: ship_id.to_string(),
                    mode: mode.to_string(),
                });
            }
        };
        info!(
            "{} autopilot enabled={} mode={} params={}",
            ship_id,
            autopilot.enabled,
            autopilot.mode_name(),
            autopilot.params
        );
        ship.autopilot = autopilot;
        Ok(&ship.autopilot)
    }

    /// Coerces and clamps the helm input to the ship's limits before storing it. The controls tag is the given
    /// mode, or manual.
    pub fn set_helm_input(
        &mut self,
        ship_id: &str,
        thrust: &Value,
        rotation: &Value,
        mode: Option<&str>,
    ) -> Result<&Controls, CommandError> {
        let ship = self.command_ship(ship_id)?;
        ship.set_helm(
            HelmInput::from_json(thrust, rotation),
            Some(mode.unwrap_or("manual")),
        );
        let helm = &ship.controls.helm;
        info!(
            "{} helm thrust={:?} yaw={:.3} pitch={:.3} roll={:.3}",
            ship_id, helm.thrust, helm.rotation.yaw, helm.rotation.pitch, helm.rotation.roll
        );
        Ok(&ship.controls)
    }

    /// Active sensor ping at the current sim time. Returns the ship's contacts afterwards.
    pub fn ping_sensors(&mut self, ship_id: &str, mode: &str) -> Result<Vec<Contact>, CommandError> {
        let now = self.sim_time();
        let ship = self
            .ships
            .iter()
            .find(|ship| ship.id == ship_id)
            .ok_or_else(|| unknown_ship(ship_id))?;
        let entities = all_entities(&self.ships, &self.projectiles);
        Ok(self.sensors.execute_active_ping(now, ship, &entities, mode))
    }

    /// An unknown ship gives no own_ship and no contacts, not an error
    pub fn get_state(&self, query: &StateQuery) -> StateSnapshot {
        let own_ship = match &query.ship_id {
            Some(id) => self.ship(id),
            None => self.ships.first(),
        };
        let contacts = match own_ship {
            Some(ship) if query.include_contacts => self.sensors.contacts_for_ship(&ship.id),
            _ => Vec::new(),
        };
        let projectiles = if query.include_projectiles {
            self.projectiles.iter().map(ProjectileRecord::from).collect()
        } else {
            Vec::new()
        };
        let entities = if query.include_raw_entities {
            Some(EntitiesRecord {
                ships: self.ships.iter().map(ShipRecord::from).collect(),
                projectiles: self.projectiles.iter().map(ProjectileRecord::from).collect(),
            })
        } else {
            None
        };
        StateSnapshot {
            server_time: self.sim_time(),
            own_ship: own_ship.map(ShipRecord::from),
            contacts,
            projectiles,
            entities,
        }
    }

    pub fn events_since(&self, last_id: u64) -> &[SensorEvent] {
        self.sensors.events_since(last_id)
    }
}
