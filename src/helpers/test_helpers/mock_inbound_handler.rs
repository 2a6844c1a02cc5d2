use super::*;

#[derive(Debug, PartialEq, Clone)]
pub enum MockInbound {
    Data(Vec<u8>),
    Close,
}

/// Records what a session delivers. Clones share the record.
#[derive(Clone, Default)]
pub struct MockInboundHandler(Arc<Mutex<Vec<MockInbound>>>);

impl MockInboundHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Vec<MockInbound> {
        self.0.lock().unwrap().clone()
    }

    /// All data received so far, concatenated
    pub fn data(&self) -> Vec<u8> {
        self.get()
            .into_iter()
            .filter_map(|event| match event {
                MockInbound::Data(data) => Some(data),
                MockInbound::Close => None,
            })
            .flatten()
            .collect()
    }
}

impl InboundBundleHandler for MockInboundHandler {
    fn handle(&mut self, data: &[u8]) {
        self.0
            .lock()
            .expect("failed to lock handler mutex")
            .push(MockInbound::Data(data.to_vec()));
    }

    fn close(&mut self) {
        self.0
            .lock()
            .expect("failed to lock handler mutex")
            .push(MockInbound::Close);
    }
}
