//! Panel host error types.

use thiserror::Error;

/// Errors raised by the terminal host.
///
/// Cache and watcher problems never surface here during normal operation;
/// the widget logs them and keeps its last content. These are the failures
/// that end the host loop.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PanelError {
    /// Terminal setup, drawing, or restore failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Stopping the cache watcher failed.
    #[error("watcher error: {0}")]
    Watcher(#[from] cs_watcher::WatchError),

    /// The terminal event stream ended unexpectedly.
    #[error("event channel closed unexpectedly")]
    ChannelClosed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn test_error_display() {
        assert_snapshot!(PanelError::ChannelClosed, @"event channel closed unexpectedly");
        let io = PanelError::from(std::io::Error::other("no tty"));
        assert_snapshot!(io, @"terminal error: no tty");
    }
}
