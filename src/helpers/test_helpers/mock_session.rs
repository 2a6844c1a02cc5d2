use super::*;

struct MockSessionInner {
    sent: Vec<Vec<u8>>,
    should_error: bool,
    is_closed: bool,
    handler: Option<Box<dyn InboundBundleHandler>>,
}

/// Stands in for both ends of a client connection. Clones share state, so a test can keep one and hand a clone
/// to the server as a SessionBuilder.
#[derive(Clone)]
pub struct MockSession(Arc<Mutex<MockSessionInner>>);

impl Debug for MockSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "MockSession")
    }
}

impl MockSession {
    /// If should_error, every send fails (after being recorded)
    pub fn new(should_error: bool) -> Self {
        Self(Arc::new(Mutex::new(MockSessionInner {
            sent: Vec::new(),
            should_error,
            is_closed: false,
            handler: None,
        })))
    }

    /// Data arriving from the client
    pub fn receive(&self, data: &[u8]) {
        let mut lock = self.0.lock().unwrap();
        let handler = lock.handler.as_mut().expect("MockSession not built");
        handler.handle(data);
    }

    /// The client disconnects
    pub fn hang_up(&self) {
        let mut lock = self.0.lock().unwrap();
        let handler = lock.handler.as_mut().expect("MockSession not built");
        handler.close();
    }

    /// Everything the server sent, one entry per send, trailing newline removed
    pub fn sent_lines(&self) -> Vec<String> {
        self.0
            .lock()
            .unwrap()
            .sent
            .iter()
            .map(|data| {
                std::str::from_utf8(data)
                    .expect("non-utf8 data")
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        self.0.lock().unwrap().is_closed
    }
}

impl SessionBuilder for MockSession {
    fn build(
        self: Box<Self>,
        handler: Box<dyn InboundBundleHandler>,
    ) -> Result<Box<dyn Session>, Box<dyn Error>> {
        self.0.lock().unwrap().handler = Some(handler);
        Ok(self)
    }
}

impl Session for MockSession {
    fn send_data(&mut self, data: &[u8]) -> Result<(), Box<dyn Error>> {
        let mut lock = self.0.lock().unwrap();
        if lock.is_closed {
            panic!("sent data after MockSession closed");
        }
        lock.sent.push(data.to_vec());
        if lock.should_error {
            Err("MockSession error".into())
        } else {
            Ok(())
        }
    }

    fn close(&mut self) {
        let mut lock = self.0.lock().unwrap();
        if lock.is_closed {
            panic!("MockSession closed multiple times");
        }
        lock.is_closed = true;
        if let Some(handler) = lock.handler.as_mut() {
            handler.close();
        }
    }
}
