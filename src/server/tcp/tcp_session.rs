use super::*;
use ::mio::net::TcpStream;
use std::io::{ErrorKind::WouldBlock, Read, Write};

/// Reads until the socket would block, handing everything to the handler
fn try_to_read_data(
    stream: &mut TcpStream,
    handler: &mut dyn InboundBundleHandler,
) -> Result<(), Box<dyn Error>> {
    let mut buffer = [0; 4096];
    loop {
        match stream.read(&mut buffer) {
            Ok(0) => {
                // Successful read of zero bytes means connection is closed
                handler.close();
                return Ok(());
            }
            Ok(len) => handler.handle(&buffer[0..len]),
            Err(ref e) if e.kind() == WouldBlock => return Ok(()),
            Err(e) => {
                handler.close();
                return Err(e.into());
            }
        }
    }
}

#[derive(Debug)]
pub struct TcpSessionBuilder {
    stream: TcpStream,
    peer: SocketAddr,
}

impl TcpSessionBuilder {
    pub fn new(stream: TcpStream, peer: SocketAddr) -> Self {
        Self { stream, peer }
    }
}

impl SessionBuilder for TcpSessionBuilder {
    fn build(
        self: Box<Self>,
        handler: Box<dyn InboundBundleHandler>,
    ) -> Result<Box<dyn Session>, Box<dyn Error>> {
        // Responses are single short lines, don't hold them back waiting for more
        self.stream
            .set_nodelay(true)
            .or_log_warn("setting TCP_NODELAY");
        let handler = Arc::new(Mutex::new(handler));
        let poll_thread_handler = handler.clone();
        let thread = new_mio_poll_thread(self.stream.try_clone()?, move |stream| {
            let mut locked_handler = poll_thread_handler
                .lock()
                .map_err(|e| format!("TCP session handler poisoned: {}", e))?;
            try_to_read_data(stream, &mut **locked_handler)
        })?;
        Ok(Box::new(TcpSession {
            stream: self.stream,
            peer: self.peer,
            handler,
            mio_poll_thread: Some(thread),
        }))
    }
}

struct TcpSession {
    stream: TcpStream,
    peer: SocketAddr,
    handler: Arc<Mutex<Box<dyn InboundBundleHandler>>>,
    mio_poll_thread: Option<Box<dyn Drop + Send>>,
}

impl Debug for TcpSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "TcpSession with {}", self.peer)
    }
}

impl Session for TcpSession {
    fn send_data(&mut self, data: &[u8]) -> Result<(), Box<dyn Error>> {
        self.stream.write_all(data)?;
        Ok(())
    }

    fn close(&mut self) {
        debug!("closing TCP session with {}", self.peer);
        self.mio_poll_thread = None;
        self.stream
            .shutdown(std::net::Shutdown::Both)
            .or_log_warn("shutting down TCP stream");
        match self.handler.lock() {
            Ok(mut handler) => handler.close(),
            Err(e) => error!("failed to close session, could not lock handler: {}", e),
        }
    }
}
