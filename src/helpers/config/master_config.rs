use super::*;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Configuration for the whole spaceship-sim-server program
#[derive(Debug)]
pub struct MasterConfig {
    /// If to abort with success (for example, after showing --help)
    pub happy_exit: bool,
    /// Simulated seconds to run before stopping, None to run until killed
    pub max_game_time: Option<f64>,
    /// Fixed simulation step, also the wall clock period of a tick
    pub tick_seconds: f64,
    pub min_sleep_seconds: f64,
    pub tcp_address: SocketAddr,
    pub scenario_path: PathBuf,
    pub sensors: SensorTuning,
}

impl Default for MasterConfig {
    /// NOTE: the real defaults come from config_entries(), this is just a placeholder struct
    fn default() -> Self {
        Self {
            happy_exit: false,
            max_game_time: None,
            tick_seconds: 0.0,
            min_sleep_seconds: 0.0,
            tcp_address: SocketAddr::from(([0, 0, 0, 0], 0)),
            scenario_path: PathBuf::new(),
            sensors: SensorTuning::default(),
        }
    }
}
