#[macro_use(new_key_type)]
extern crate slotmap;
#[macro_use]
extern crate log;

mod engine;
mod game;
mod helpers;
mod server;

#[cfg(test)]
use cgmath::{assert_abs_diff_eq, assert_ulps_eq};
#[cfg(test)]
use std::time::Duration;
use cgmath::{prelude::*, Deg, Matrix3, Point3, Vector3};
use std::{
    collections::{BTreeMap, HashMap, HashSet},
    error::Error,
    fmt::{Debug, Formatter},
    sync::{
        atomic::{AtomicBool, Ordering::SeqCst},
        mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError},
        Arc, Mutex,
    },
    time::Instant,
};

use engine::{Engine, Inbound};
use game::*;
use helpers::*;
use server::*;

/// A very small value; used for floating-point comparisons
pub const EPSILON: f64 = 0.000_001;

pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn run() -> Result<(), Box<dyn Error>> {
    let conf = build_config(std::env::args().collect())?;
    if conf.happy_exit {
        return Ok(());
    }
    info!("{:#?}", conf);

    let scenario = load_scenario(&conf.scenario_path, real_filesystem())?;
    info!(
        "loaded scenario {:?} with {} ships and {} gravity bodies",
        scenario.info.id,
        scenario.ships.len(),
        scenario.gravity_bodies.len()
    );

    let (inbox_tx, inbox_rx) = channel();
    let stop = Arc::new(AtomicBool::new(false));
    ctrlc::set_handler({
        let stop = stop.clone();
        let inbox_tx = inbox_tx.clone();
        move || {
            info!("interrupted, stopping after the current tick");
            stop.store(true, SeqCst);
            // Wakes the engine if it is waiting out the end of a tick
            let _ = inbox_tx.send(Inbound::Stop);
        }
    })?;

    let _listener = TcpListener::new(inbox_tx.clone(), conf.tcp_address)?;
    info!("listening for API v{} clients on {}", API_VERSION, conf.tcp_address);

    let mut engine = Engine::new(&conf, scenario, inbox_tx, inbox_rx, stop);
    engine.run();
    info!("stopped at sim time {:.1}s", engine.world().sim_time());
    Ok(())
}

fn main() {
    init_logger();
    if let Err(e) = run() {
        error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
