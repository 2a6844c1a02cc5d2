use super::*;
use std::io::ErrorKind::WouldBlock;

fn try_to_accept_connections(
    listener: &::mio::net::TcpListener,
    inbox_tx: &Sender<Inbound>,
) -> Result<(), Box<dyn Error>> {
    loop {
        match listener.accept() {
            Ok((stream, peer)) => {
                info!("accepted TCP connection from {}", peer);
                let session = TcpSessionBuilder::new(stream, peer);
                if let Err(e) = inbox_tx.send(Inbound::NewSession(Box::new(session))) {
                    error!("failed to send TCP session: {}", e);
                }
            }
            Err(ref e) if e.kind() == WouldBlock => return Ok(()),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Accepts clients on its own thread and hands each one to the engine as an Inbound::NewSession
pub struct TcpListener {
    address: SocketAddr,
    _mio_poll_thread: Box<dyn Drop>,
}

impl TcpListener {
    pub fn new(inbox_tx: Sender<Inbound>, addr: SocketAddr) -> Result<Self, Box<dyn Error>> {
        let listener = ::mio::net::TcpListener::bind(&addr)
            .map_err(|e| format!("binding TCP listener to {}: {}", addr, e))?;
        let thread = new_mio_poll_thread(listener, move |listener| {
            try_to_accept_connections(listener, &inbox_tx)
        })?;
        Ok(Self {
            address: addr,
            _mio_poll_thread: thread,
        })
    }
}

impl Debug for TcpListener {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "TcpListener on {:?}", self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io::{Read, Write},
        net::TcpStream,
        thread,
    };

    const SHORT_TIME: Duration = Duration::from_millis(20);

    fn build(tx: Sender<Inbound>) -> (ReservedSocket, TcpListener) {
        let socket = provision_socket();
        match TcpListener::new(tx, *socket) {
            Ok(listener) => (socket, listener),
            Err(e) => panic!("failed to create TcpListener: {}", e),
        }
    }

    fn session_builders(rx: &Receiver<Inbound>) -> Vec<Box<dyn SessionBuilder>> {
        rx.try_iter()
            .map(|message| match message {
                Inbound::NewSession(builder) => builder,
                other => panic!("unexpected {:?}", other),
            })
            .collect()
    }

    #[test]
    fn can_start_and_stop_immediately() {
        run_with_timeout(|| {
            let (tx, _rx) = channel();
            let (_socket, _listener) = build(tx);
        });
    }

    #[test]
    fn does_not_create_session_by_default() {
        let (tx, rx) = channel();
        run_with_timeout(|| {
            let (_socket, _listener) = build(tx);
            thread::sleep(SHORT_TIME);
        });
        assert_eq!(session_builders(&rx).len(), 0);
    }

    #[test]
    fn can_create_multiple_sessions() {
        let (tx, rx) = channel();
        run_with_timeout(|| {
            let (socket, _listener) = build(tx);
            let _client_a = TcpStream::connect(*socket).expect("failed to connect");
            let _client_b = TcpStream::connect(*socket).expect("failed to connect");
            thread::sleep(SHORT_TIME);
            let _client_c = TcpStream::connect(*socket).expect("failed to connect");
            thread::sleep(SHORT_TIME);
        });
        assert_eq!(session_builders(&rx).len(), 3);
    }

    #[test]
    fn can_send_data_both_ways() {
        run_with_timeout(|| {
            let (tx, rx) = channel();
            let (socket, _listener) = build(tx);
            let mut client = TcpStream::connect(*socket).expect("failed to connect");
            thread::sleep(SHORT_TIME);
            let builder = session_builders(&rx).pop().expect("no session");
            let handler = MockInboundHandler::new();
            let mut session = builder.build(Box::new(handler.clone())).unwrap();

            client.write_all(b"{}\n").unwrap();
            thread::sleep(SHORT_TIME);
            assert_eq!(handler.data(), b"{}\n".to_vec());

            session.send_data(b"ok\n").unwrap();
            let mut buffer = [0; 3];
            client.read_exact(&mut buffer).unwrap();
            assert_eq!(&buffer, b"ok\n");
        });
    }

    #[test]
    fn client_disconnect_closes_handler() {
        run_with_timeout(|| {
            let (tx, rx) = channel();
            let (socket, _listener) = build(tx);
            let client = TcpStream::connect(*socket).expect("failed to connect");
            thread::sleep(SHORT_TIME);
            let builder = session_builders(&rx).pop().expect("no session");
            let handler = MockInboundHandler::new();
            let _session = builder.build(Box::new(handler.clone())).unwrap();
            drop(client);
            thread::sleep(SHORT_TIME);
            assert_eq!(handler.get(), vec![MockInbound::Close]);
        });
    }

    #[test]
    fn can_shut_down_while_client_still_active() {
        run_with_timeout(move || {
            let _client;
            {
                let (tx, rx) = channel();
                let (socket, _listener) = build(tx);
                _client = TcpStream::connect(*socket).expect("failed to connect");
                thread::sleep(SHORT_TIME);
                let builder = session_builders(&rx).pop().expect("no session");
                let _session = builder.build(Box::new(MockInboundHandler::new())).unwrap();
            }
        });
    }
}
