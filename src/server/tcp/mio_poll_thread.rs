//! A thread that blocks on one mio source and calls back whenever it is readable

use super::*;
use ::mio::{event::Evented, Events, Poll, PollOpt, Ready, Registration, SetReadiness, Token};
use std::{
    sync::atomic::Ordering,
    thread::{spawn, JoinHandle},
};

const TOKEN: Token = Token(0);

fn poll_loop<F>(
    poll: Poll,
    _quit_registration: Registration,
    should_quit: Arc<AtomicBool>,
    mut process_event: F,
) where
    F: FnMut() -> Result<(), Box<dyn Error>>,
{
    let mut events = Events::with_capacity(256);
    loop {
        if let Err(e) = poll.poll(&mut events, None) {
            error!("mio poll failed, stopping poll thread: {}", e);
            break;
        }
        if should_quit.load(Ordering::Relaxed) {
            break;
        }
        for event in events.iter() {
            match event.token() {
                TOKEN => {
                    if let Err(e) = process_event() {
                        error!("processing mio event: {}", e);
                    }
                }
                token => {
                    error!("invalid mio token {:?}", token);
                }
            }
        }
    }
}

struct MioPollThread {
    /// Once set to true next iteration of the poll loop will exit the thread
    should_quit: Arc<AtomicBool>,
    /// Allows us to interrupt the poll loop
    set_readiness_to_quit: SetReadiness,
    /// Option only so we can .take() it in the destructor
    join_handle: Option<JoinHandle<()>>,
}

impl Drop for MioPollThread {
    fn drop(&mut self) {
        self.should_quit.store(true, Ordering::Relaxed);
        if let Err(e) = self.set_readiness_to_quit.set_readiness(Ready::readable()) {
            error!("failed to wake mio poll thread, not joining it: {}", e);
            return;
        }
        if let Some(join_handle) = self.join_handle.take() {
            if let Err(e) = join_handle.join() {
                error!("mio poll thread panicked: {:?}", e);
            }
        }
    }
}

/// Spawns the thread. It runs until the returned value is dropped.
pub fn new_mio_poll_thread<F, T>(
    mut source: T,
    mut process_event: F,
) -> Result<Box<dyn Drop + Send>, Box<dyn Error>>
where
    T: Evented + Send + 'static,
    F: FnMut(&mut T) -> Result<(), Box<dyn Error>> + Send + 'static,
{
    let poll = Poll::new()?;
    poll.register(&source, TOKEN, Ready::readable(), PollOpt::edge())?;
    let (quit_registration, set_readiness_to_quit) = Registration::new2();
    poll.register(
        &quit_registration,
        TOKEN,
        Ready::readable(),
        PollOpt::edge(),
    )?;
    let should_quit = Arc::new(AtomicBool::new(false));
    let join_handle = {
        let should_quit = should_quit.clone();
        let process_event = move || process_event(&mut source);
        spawn(|| poll_loop(poll, quit_registration, should_quit, process_event))
    };
    Ok(Box::new(MioPollThread {
        should_quit,
        set_readiness_to_quit,
        join_handle: Some(join_handle),
    }))
}
