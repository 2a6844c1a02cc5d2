use super::*;

/// Receives raw bytes from a session's network thread
pub trait InboundBundleHandler: Send {
    fn handle(&mut self, data: &[u8]);
    /// The client went away. May be called more than once.
    fn close(&mut self);
}

/// A client that is trying to connect
pub trait SessionBuilder: Send + Debug {
    /// Try to build the session, the handler will receive any data that has already arrived, plus all future
    /// data.
    fn build(
        self: Box<Self>,
        handler: Box<dyn InboundBundleHandler>,
    ) -> Result<Box<dyn Session>, Box<dyn Error>>;
}

/// A reliable, ordered byte stream to a client
pub trait Session: Send + Debug {
    /// Errors if there's an issue with the underlying connection
    fn send_data(&mut self, data: &[u8]) -> Result<(), Box<dyn Error>>;
    /// Close the session, which should result in its inbound handler getting a close() (although not necessarily
    /// immediately)
    fn close(&mut self);
}
