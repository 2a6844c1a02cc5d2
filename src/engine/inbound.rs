use super::*;

/// Everything other threads can ask of the engine. This channel is the only way into the world.
#[derive(Debug)]
pub enum Inbound {
    /// A client connected
    NewSession(Box<dyn SessionBuilder>),
    /// A line from a client, or why it could not be decoded
    Request {
        connection: ConnectionKey,
        request: Result<ApiRequest, ApiError>,
    },
    /// A client disconnected
    Closed(ConnectionKey),
    /// Finish the current tick and return from Engine::run()
    Stop,
}
