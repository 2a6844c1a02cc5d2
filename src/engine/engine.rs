use super::*;
use serde_json::json;

/// Messages handled after a tick has already used up its time. Keeps a flood of requests from stalling the
/// simulation.
const MAX_LATE_MESSAGES: usize = 256;

pub struct Engine {
    world: World,
    metronome: Metronome,
    connections: ConnectionCollection,
    inbox_rx: Receiver<Inbound>,
    stop: Arc<AtomicBool>,
    max_game_time: Option<f64>,
}

impl Engine {
    /// inbox_tx must feed inbox_rx; connections use it to forward their requests
    pub fn new(
        conf: &MasterConfig,
        scenario: Scenario,
        inbox_tx: Sender<Inbound>,
        inbox_rx: Receiver<Inbound>,
        stop: Arc<AtomicBool>,
    ) -> Self {
        Self {
            world: World::new(scenario, conf.tick_seconds, conf.sensors),
            metronome: Metronome::new(conf.tick_seconds, conf.min_sleep_seconds),
            connections: ConnectionCollection::new(inbox_tx),
            inbox_rx,
            stop,
            max_game_time: conf.max_game_time,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    fn should_continue(&self) -> bool {
        if self.stop.load(SeqCst) {
            return false;
        }
        match self.max_game_time {
            Some(max) => self.world.sim_time() + EPSILON < max,
            None => true,
        }
    }

    /// Ticks until stopped, serving requests between ticks
    pub fn run(&mut self) {
        info!(
            "running {:?} at {}s per tick",
            self.world.info.title,
            self.world.dt()
        );
        while self.should_continue() {
            self.world.tick();
            self.serve_until_next_tick();
            self.metronome.finish_tick();
        }
        self.connections.finalize();
    }

    /// Handles messages as they arrive until the next tick is due. The deadline is fixed up front so a busy inbox
    /// can not hold the next tick back.
    fn serve_until_next_tick(&mut self) {
        let deadline = Instant::now() + self.metronome.remaining();
        let mut late = 0;
        loop {
            let now = Instant::now();
            let message = if now < deadline {
                match self.inbox_rx.recv_timeout(deadline - now) {
                    Ok(message) => message,
                    Err(RecvTimeoutError::Timeout) => return,
                    Err(RecvTimeoutError::Disconnected) => {
                        std::thread::sleep(deadline - now);
                        return;
                    }
                }
            } else {
                if late >= MAX_LATE_MESSAGES {
                    return;
                }
                late += 1;
                match self.inbox_rx.try_recv() {
                    Ok(message) => message,
                    Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return,
                }
            };
            if !self.handle(message) {
                return;
            }
        }
    }

    /// Returns false once the engine has been told to stop
    fn handle(&mut self, message: Inbound) -> bool {
        match message {
            Inbound::NewSession(builder) => self.connections.add(builder),
            Inbound::Request {
                connection,
                request,
            } => {
                let response = match request {
                    Ok(request) => dispatch(&mut self.world, &request),
                    Err(e) => {
                        warn!("bad request from {:?}: {}", connection, e);
                        ApiResponse::error(None, json!({}), e.to_string())
                    }
                };
                self.connections.respond(connection, &response);
            }
            Inbound::Closed(connection) => self.connections.closed(connection),
            Inbound::Stop => {
                self.stop.store(true, SeqCst);
                return false;
            }
        }
        true
    }
}
