use super::*;

/// Longest request line accepted from a client
pub const MAX_REQUEST_LEN: usize = 10 * 1024 * 1024;

/// Runs on a session's network thread. Splits the byte stream into lines, decodes each one and forwards it to the
/// engine. Decoding failures are forwarded too so the client still gets a response.
pub struct RequestDecoder {
    connection: ConnectionKey,
    splitter: DatagramSplitter,
    inbox_tx: Sender<Inbound>,
    closed: bool,
}

impl RequestDecoder {
    pub fn new(connection: ConnectionKey, inbox_tx: Sender<Inbound>) -> Self {
        Self::with_max_len(connection, inbox_tx, MAX_REQUEST_LEN)
    }

    fn with_max_len(connection: ConnectionKey, inbox_tx: Sender<Inbound>, max_len: usize) -> Self {
        Self {
            connection,
            splitter: DatagramSplitter::new(b'\n', max_len),
            inbox_tx,
            closed: false,
        }
    }

    fn forward(&self, request: Result<ApiRequest, ApiError>) {
        let message = Inbound::Request {
            connection: self.connection,
            request,
        };
        if self.inbox_tx.send(message).is_err() {
            warn!("engine is gone, dropping request from {:?}", self.connection);
        }
    }
}

impl InboundBundleHandler for RequestDecoder {
    fn handle(&mut self, data: &[u8]) {
        if self.closed {
            return;
        }
        for datagram in self.splitter.data(data) {
            match datagram {
                Ok(line) => self.forward(ApiRequest::decode(&line)),
                Err(e) => {
                    warn!("{:?}: {}", self.connection, e);
                    self.forward(Err(ApiError::BadMessage(e.to_string())));
                }
            }
        }
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            let _ = self.inbox_tx.send(Inbound::Closed(self.connection));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn decoder() -> (RequestDecoder, Receiver<Inbound>, ConnectionKey) {
        let (tx, rx) = channel();
        let key = ConnectionKey::from(KeyData::from_ffi(1));
        (RequestDecoder::new(key, tx), rx, key)
    }

    fn requests(rx: &Receiver<Inbound>) -> Vec<Result<ApiRequest, ApiError>> {
        rx.try_iter()
            .map(|message| match message {
                Inbound::Request { request, .. } => request,
                other => panic!("unexpected {:?}", other),
            })
            .collect()
    }

    #[test]
    fn forwards_complete_lines() {
        let (mut decoder, rx, _) = decoder();
        decoder.handle(b"{\"action\": \"get_state\"}\n{\"action\": ");
        decoder.handle(b"\"get_events\"}\n");
        let actions: Vec<String> = requests(&rx)
            .into_iter()
            .map(|r| r.unwrap().action)
            .collect();
        assert_eq!(actions, vec!["get_state", "get_events"]);
    }

    #[test]
    fn forwards_decode_errors() {
        let (mut decoder, rx, _) = decoder();
        decoder.handle(b"not json\n");
        let requests = requests(&rx);
        assert_eq!(requests.len(), 1);
        assert!(matches!(requests[0], Err(ApiError::BadMessage(_))));
    }

    #[test]
    fn oversized_line_does_not_swallow_its_neighbours() {
        let (tx, rx) = channel();
        let key = ConnectionKey::from(KeyData::from_ffi(1));
        let mut decoder = RequestDecoder::with_max_len(key, tx, 32);
        let mut data = b"{\"action\": \"get_state\"}\n".to_vec();
        data.extend_from_slice(&[b'x'; 64]);
        data.extend_from_slice(b"\n{\"action\": \"get_events\"}\n");
        decoder.handle(&data);
        let requests = requests(&rx);
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].as_ref().unwrap().action, "get_state");
        assert!(matches!(requests[1], Err(ApiError::BadMessage(_))));
        assert_eq!(requests[2].as_ref().unwrap().action, "get_events");
    }

    #[test]
    fn closes_once() {
        let (mut decoder, rx, key) = decoder();
        decoder.close();
        decoder.close();
        decoder.handle(b"{\"action\": \"get_state\"}\n");
        let messages: Vec<Inbound> = rx.try_iter().collect();
        assert_eq!(messages.len(), 1);
        assert!(matches!(messages[0], Inbound::Closed(k) if k == key));
    }
}
