//! Bounded visibility polling for drivers without a native wait

use crate::{driver::PageDriver, errors::ActionError, types::AnchorDescriptor};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Polling configuration for visibility waits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    /// Delay between two visibility probes (milliseconds)
    pub poll_interval_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
        }
    }
}

impl WaitConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

/// Probe `anchor` until it is visible or `timeout` elapses.
///
/// Probe errors are treated as "not visible yet"; only the deadline ends
/// the wait with an error.
pub async fn poll_until_visible<D>(
    driver: &D,
    anchor: &AnchorDescriptor,
    timeout: Duration,
    config: WaitConfig,
) -> Result<(), ActionError>
where
    D: PageDriver + ?Sized,
{
    let deadline = Instant::now() + timeout;
    loop {
        match driver.is_visible(anchor).await {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(err) => debug!(anchor = %anchor, error = %err, "visibility probe failed"),
        }
        let now = Instant::now();
        if now >= deadline {
            return Err(ActionError::WaitTimeout(format!(
                "{} not visible within {}ms",
                anchor,
                timeout.as_millis()
            )));
        }
        tokio::time::sleep(config.poll_interval().min(deadline - now)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_wait_config() {
        let config = WaitConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
        assert_eq!(
            WaitConfig { poll_interval_ms: 0 }.poll_interval(),
            Duration::from_millis(1)
        );
    }
}
