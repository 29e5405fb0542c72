//! Connection state for the notification stream.

/// State of the server-push subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Error(String),
}

impl ConnectionState {
    /// Transition to connecting state.
    pub fn connect(self) -> Self {
        ConnectionState::Connecting
    }

    /// Transition to connected state.
    pub fn connected(self) -> Self {
        ConnectionState::Connected
    }

    /// Transition to disconnected state.
    pub fn disconnect(self) -> Self {
        ConnectionState::Disconnected
    }

    /// Transition to error state.
    pub fn error(self, msg: &str) -> Self {
        ConnectionState::Error(msg.to_string())
    }

    /// Check if connected.
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    /// User-visible status string, if the state carries one.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ConnectionState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

impl Default for ConnectionState {
    fn default() -> Self {
        ConnectionState::Disconnected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_state_transitions() {
        let mut state = ConnectionState::Disconnected;

        state = state.connect();
        assert!(matches!(state, ConnectionState::Connecting));

        state = state.connected();
        assert!(state.is_connected());

        state = state.disconnect();
        assert!(matches!(state, ConnectionState::Disconnected));
    }

    #[test]
    fn test_connection_state_error() {
        let state = ConnectionState::Connecting;
        let state = state.error("connection lost");
        assert_eq!(state.error_message(), Some("connection lost"));
        assert!(!state.is_connected());
    }
}
