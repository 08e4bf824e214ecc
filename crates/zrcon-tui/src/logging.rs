//! Routing `tracing` output into the output pane.
//!
//! The console owns the terminal, so writing log records to stderr would
//! tear the screen. [`LogSink`] is a [`MakeWriter`] whose writers buffer one
//! formatted record and hand it over a channel when dropped; the display
//! drains the channel on every refresh.

use std::io;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing_subscriber::fmt::MakeWriter;

/// Formatted log records waiting for the display.
pub type LogReceiver = UnboundedReceiver<String>;

/// Create a sink and the receiver the display drains.
pub fn log_channel() -> (LogSink, LogReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (LogSink { tx }, rx)
}

/// [`MakeWriter`] that forwards each record over a channel.
#[derive(Debug, Clone)]
pub struct LogSink {
    tx: UnboundedSender<String>,
}

/// Writer for a single record.
#[derive(Debug)]
pub struct LogWriter {
    tx: UnboundedSender<String>,
    buf: Vec<u8>,
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter { tx: self.tx.clone(), buf: Vec::new() }
    }
}

impl io::Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let record = String::from_utf8_lossy(&self.buf).into_owned();
        // display already gone: nowhere left to show it
        let _ = self.tx.send(record);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn one_record_per_writer() {
        let (sink, mut rx) = log_channel();

        {
            let mut writer = sink.make_writer();
            writer.write_all(b"INFO ").expect("buffered write");
            writer.write_all(b"monitor: EVENT_CONNECTED 12\n").expect("buffered write");
        }
        drop(sink.make_writer());

        assert_eq!(rx.try_recv().ok().as_deref(), Some("INFO monitor: EVENT_CONNECTED 12\n"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closed_display_is_ignored() {
        let (sink, rx) = log_channel();
        drop(rx);

        let mut writer = sink.make_writer();
        writer.write_all(b"late record\n").expect("buffered write");
        drop(writer);
    }

    #[test]
    fn subscriber_output_reaches_channel() {
        let (sink, mut rx) = log_channel();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(sink)
            .with_ansi(false)
            .without_time()
            .with_target(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Registering with the server.");
        });

        let record = rx.try_recv().expect("one record");
        assert!(record.contains("INFO"));
        assert!(record.contains("Registering with the server."));
    }
}
