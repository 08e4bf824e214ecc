//! Monitor channel polling shared by the console and the stats listener.

use zrcon_proto::LifecycleEvent;

use crate::Transport;

/// Take at most one pending monitor notification and decode it.
///
/// Logs the decoded event. Malformed records and monitor failures are logged
/// and dropped; they never stop the caller's loop.
pub fn check_monitor<T: Transport>(transport: &mut T) -> Option<LifecycleEvent> {
    let raw = match transport.try_recv_event() {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("monitor: {e}");
            return None;
        },
    };

    match LifecycleEvent::decode(&raw.record, &raw.endpoint) {
        Ok(event) => {
            if event.kind.is_failure() {
                tracing::warn!("monitor: {event}");
            } else {
                tracing::info!("monitor: {event}");
            }
            Some(event)
        },
        Err(e) => {
            tracing::warn!("monitor: dropping record: {e}");
            None
        },
    }
}
