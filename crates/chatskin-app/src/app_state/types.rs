//! Internal constants for the app state module.

use std::time::Duration;

/// How often to drain pass scripts and config updates (approx 60 Hz).
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Grace period for background tasks at shutdown.
pub(super) const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);
