use super::*;
use slotmap::DenseSlotMap;

new_key_type! {
    pub struct ConnectionKey;
}

/// Every connected client, owned by the engine thread
pub struct ConnectionCollection {
    /// None only while a session is being built
    sessions: DenseSlotMap<ConnectionKey, Option<Box<dyn Session>>>,
    inbox_tx: Sender<Inbound>,
}

impl ConnectionCollection {
    /// Requests from every session are sent to inbox_tx
    pub fn new(inbox_tx: Sender<Inbound>) -> Self {
        Self {
            sessions: DenseSlotMap::with_key(),
            inbox_tx,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn add(&mut self, builder: Box<dyn SessionBuilder>) {
        info!("new session: {:?}", builder);
        // The decoder needs the key before the session exists
        let key = self.sessions.insert(None);
        let decoder = RequestDecoder::new(key, self.inbox_tx.clone());
        match builder.build(Box::new(decoder)) {
            Ok(session) => self.sessions[key] = Some(session),
            Err(e) => {
                error!("error building session: {}", e);
                self.sessions.remove(key);
            }
        }
    }

    /// Sends a response. A session that fails to send is closed.
    pub fn respond(&mut self, connection: ConnectionKey, response: &ApiResponse) {
        let data = match response.encode() {
            Ok(data) => data,
            Err(e) => {
                error!("failed to encode response to {}: {}", response.action, e);
                return;
            }
        };
        let result = match self.sessions.get_mut(connection) {
            Some(Some(session)) => session.send_data(&data),
            _ => {
                warn!("response for dead connection {:?} dropped", connection);
                return;
            }
        };
        if let Err(e) = result {
            warn!("failed to send to {:?}, closing: {}", connection, e);
            self.close(connection);
        }
    }

    /// The client went away on its own
    pub fn closed(&mut self, connection: ConnectionKey) {
        match self.sessions.remove(connection) {
            Some(_) => info!("connection {:?} closed", connection),
            None => trace!("already removed connection {:?} closed", connection),
        }
    }

    /// Closes from the server side
    pub fn close(&mut self, connection: ConnectionKey) {
        if let Some(Some(mut session)) = self.sessions.remove(connection) {
            info!("closing connection {:?}", connection);
            session.close();
        }
    }

    pub fn finalize(&mut self) {
        for (_, session) in self.sessions.drain() {
            if let Some(mut session) = session {
                session.close();
            }
        }
    }
}
