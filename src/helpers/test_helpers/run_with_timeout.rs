use super::*;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs f on its own thread and panics if it has not returned within timeout. A panic inside f is re-raised with
/// its message so the failing test shows the real cause.
pub fn run_with_specific_timeout<T, F>(timeout: Duration, f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (result_tx, result_rx) = channel();
    let handle = thread::spawn(move || {
        // If the receiver timed out nobody is listening any more
        let _ = result_tx.send(f());
    });
    match result_rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(Timeout) => panic!("test body timed out after {:?}", timeout),
        Err(Disconnected) => match handle.join() {
            Err(payload) => panic!("test body panicked: {}", attempt_any_to_string(&*payload)),
            Ok(()) => panic!("test body exited without producing a result"),
        },
    }
}

/// run_with_specific_timeout() with DEFAULT_TIMEOUT
pub fn run_with_timeout<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    run_with_specific_timeout(DEFAULT_TIMEOUT, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_value() {
        let result = run_with_timeout(move || {
            thread::sleep(Duration::from_millis(20));
            12
        });
        assert_eq!(result, 12);
    }

    #[test]
    #[should_panic(expected = "timed out")]
    fn times_out() {
        run_with_specific_timeout(Duration::from_millis(50), move || {
            thread::sleep(Duration::from_secs(2));
        });
    }

    #[test]
    #[should_panic(expected = "reactor offline")]
    fn shows_panic_message() {
        run_with_timeout(move || {
            panic!("reactor offline");
        });
    }
}
