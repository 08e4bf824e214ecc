//! zmq socket and monitor.
//!
//! Every receive is non-blocking. "No data" (`EAGAIN`) comes back as
//! `Ok(None)`; any other zmq failure becomes a [`TransportError`]. Blocking
//! is confined to [`Transport::poll_readable`].

use std::time::Duration;

use uuid::Uuid;
use zrcon_app::{ConnectionConfig, MonitorRecord, Transport, TransportError};
use zrcon_proto::Role;

/// Fresh socket identity: a random UUID as 32 lowercase hex digits.
pub fn default_identity() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Version of the linked libzmq, e.g. `4.3.5`.
pub fn libzmq_version() -> String {
    let (major, minor, patch) = zmq::version();
    format!("{major}.{minor}.{patch}")
}

/// A connected-on-demand zmq socket with its lifecycle monitor.
pub struct ZmqTransport {
    socket: zmq::Socket,
    monitor: zmq::Socket,
    endpoint: String,
    role: Role,
    identity: Option<String>,
}

impl ZmqTransport {
    /// Create and configure the socket. Nothing is connected yet.
    ///
    /// Identity and PLAIN credentials are applied here because zmq only
    /// honors them before `connect`. The monitor is attached here too so the
    /// first `Connected` event is not missed.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Setup`] if socket creation or any option
    /// fails, and [`TransportError::Monitor`] if the monitor cannot be
    /// attached.
    pub fn new(config: &ConnectionConfig) -> Result<Self, TransportError> {
        let context = zmq::Context::new();

        let kind = match config.role {
            Role::Rcon => zmq::DEALER,
            Role::Stats => zmq::SUB,
        };
        let socket = context.socket(kind).map_err(setup("socket"))?;
        socket.set_linger(0).map_err(setup("linger"))?;

        let identity = match config.role {
            Role::Rcon => Some(config.identity.clone().unwrap_or_else(default_identity)),
            Role::Stats => config.identity.clone(),
        };
        if let Some(identity) = &identity {
            socket.set_identity(identity.as_bytes()).map_err(setup("identity"))?;
        }

        if let Some(credentials) = config.credentials() {
            tracing::info!("setting password for access");
            socket.set_plain_username(Some(credentials.username)).map_err(setup("plain username"))?;
            socket.set_plain_password(Some(credentials.password)).map_err(setup("plain password"))?;
            socket.set_zap_domain(credentials.domain).map_err(setup("zap domain"))?;
        }

        let monitor_endpoint = format!("inproc://zrcon-monitor-{}", default_identity());
        socket
            .monitor(&monitor_endpoint, zmq::SocketEvent::ALL as i32)
            .map_err(|e| TransportError::Monitor(e.to_string()))?;
        let monitor = context.socket(zmq::PAIR).map_err(setup("monitor socket"))?;
        monitor.connect(&monitor_endpoint).map_err(|e| TransportError::Monitor(e.to_string()))?;

        Ok(Self { socket, monitor, endpoint: config.endpoint.clone(), role: config.role, identity })
    }

    /// Identity the socket announces, if any.
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }
}

impl Transport for ZmqTransport {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn connect(&mut self) -> Result<(), TransportError> {
        self.socket.connect(&self.endpoint).map_err(setup("connect"))?;
        if self.role == Role::Stats {
            self.socket.set_subscribe(b"").map_err(setup("subscribe"))?;
        }
        Ok(())
    }

    fn poll_readable(&mut self, timeout: Duration) -> Result<bool, TransportError> {
        let ready = self
            .socket
            .poll(zmq::POLLIN, poll_timeout_ms(timeout))
            .map_err(|e| TransportError::Poll(e.to_string()))?;
        Ok(ready > 0)
    }

    fn try_recv_event(&mut self) -> Result<Option<MonitorRecord>, TransportError> {
        let record = match self.monitor.recv_bytes(zmq::DONTWAIT) {
            Ok(record) => record,
            Err(zmq::Error::EAGAIN) => return Ok(None),
            Err(e) => return Err(TransportError::Monitor(e.to_string())),
        };

        // The endpoint frame always follows the record frame.
        let endpoint = self
            .monitor
            .recv_bytes(zmq::DONTWAIT)
            .map_err(|e| TransportError::Monitor(e.to_string()))?;

        Ok(Some(MonitorRecord { record, endpoint }))
    }

    fn try_recv(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        match self.socket.recv_bytes(zmq::DONTWAIT) {
            Ok(message) => Ok(Some(message)),
            Err(zmq::Error::EAGAIN) => Ok(None),
            Err(e) => Err(TransportError::Recv(e.to_string())),
        }
    }

    fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        self.socket.send(payload, zmq::DONTWAIT).map_err(|e| TransportError::Send(e.to_string()))
    }
}

fn setup(what: &'static str) -> impl Fn(zmq::Error) -> TransportError {
    move |e| TransportError::Setup(format!("{what}: {e}"))
}

/// zmq takes milliseconds as `i64`; saturate instead of wrapping.
fn poll_timeout_ms(timeout: Duration) -> i64 {
    i64::try_from(timeout.as_millis()).unwrap_or(i64::MAX)
}
