//! Connection configuration.

use std::time::Duration;

use zrcon_proto::{
    DEFAULT_RCON_ENDPOINT, DEFAULT_STATS_ENDPOINT, RCON_POLL_TIMEOUT, Role, STATS_POLL_TIMEOUT,
};

/// Everything needed to open one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Endpoint URI, e.g. `tcp://127.0.0.1:27961`.
    pub endpoint: String,
    /// Socket role; fixes the PLAIN username and ZAP domain.
    pub role: Role,
    /// Socket identity. `None` leaves it to the transport.
    pub identity: Option<String>,
    /// Shared secret. `None` connects without PLAIN authentication.
    pub password: Option<String>,
    /// Upper bound on one readable poll.
    pub poll_timeout: Duration,
}

/// PLAIN credentials derived from a config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials<'a> {
    /// PLAIN username.
    pub username: &'a str,
    /// PLAIN password.
    pub password: &'a str,
    /// ZAP authentication domain.
    pub domain: &'a str,
}

impl ConnectionConfig {
    /// Console defaults: local rcon endpoint, 100 ms poll.
    pub fn rcon() -> Self {
        Self {
            endpoint: DEFAULT_RCON_ENDPOINT.to_string(),
            role: Role::Rcon,
            identity: None,
            password: None,
            poll_timeout: RCON_POLL_TIMEOUT,
        }
    }

    /// Stats listener defaults: local stats endpoint, 1 s poll.
    pub fn stats() -> Self {
        Self {
            endpoint: DEFAULT_STATS_ENDPOINT.to_string(),
            role: Role::Stats,
            identity: None,
            password: None,
            poll_timeout: STATS_POLL_TIMEOUT,
        }
    }

    /// Override the endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the socket identity.
    #[must_use]
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Set the shared secret.
    #[must_use]
    pub fn with_password(mut self, password: Option<String>) -> Self {
        self.password = password;
        self
    }

    /// Override the poll timeout.
    #[must_use]
    pub fn with_poll_timeout(mut self, poll_timeout: Duration) -> Self {
        self.poll_timeout = poll_timeout;
        self
    }

    /// PLAIN credentials, if a password was supplied.
    pub fn credentials(&self) -> Option<Credentials<'_>> {
        self.password.as_deref().map(|password| Credentials {
            username: self.role.username(),
            password,
            domain: self.role.auth_domain(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_per_role() {
        let rcon = ConnectionConfig::rcon();
        assert_eq!(rcon.endpoint, "tcp://127.0.0.1:27961");
        assert_eq!(rcon.poll_timeout, Duration::from_millis(100));

        let stats = ConnectionConfig::stats();
        assert_eq!(stats.endpoint, "tcp://127.0.0.1:27960");
        assert_eq!(stats.poll_timeout, Duration::from_millis(1000));
    }

    #[test]
    fn no_password_no_credentials() {
        assert!(ConnectionConfig::rcon().credentials().is_none());
    }

    #[test]
    fn credentials_follow_role() {
        let config = ConnectionConfig::stats().with_password(Some("secret".into()));

        let credentials = config.credentials().expect("password set");
        assert_eq!(credentials.username, "stats");
        assert_eq!(credentials.password, "secret");
        assert_eq!(credentials.domain, "stats");
    }
}
