use std::time::Duration;

/// Default slippage in percent, used when the slippage field is left empty
pub const DEFAULT_SLIPPAGE_PCT: f64 = 1.0;

/// Default amount shown in the form
pub const DEFAULT_AMOUNT_IN: &str = "0.01";

/// Swap deadline, relative to submission time (20 minutes)
pub const DEFAULT_DEADLINE_SECS: u64 = 60 * 20;

/// How long a timed status message stays visible
pub const DEFAULT_STATUS_CLEAR_DELAY: Duration = Duration::from_millis(5_000);

/// Pause between showing the quote and submitting the swap
pub const DEFAULT_QUOTE_REVIEW_DELAY: Duration = Duration::from_millis(4_000);

/// Receipt polling interval
pub const DEFAULT_CONFIRM_POLL_INTERVAL: Duration = Duration::from_millis(2_000);

/// Upper bound on waiting for a single receipt
pub const DEFAULT_CONFIRM_TIMEOUT: Duration = Duration::from_secs(180);
