//! Upper bound applied to every call into a backing subsystem.

use std::future::Future;
use std::time::Duration;

/// Deadline for a single subsystem call.
///
/// Adapters may enforce their own transport timeouts as well; this bound
/// keeps the domain's guarantees independent of any one adapter.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use identity_admin::domain::CallTimeout;
///
/// let timeout = CallTimeout::new(Duration::from_secs(3));
/// assert_eq!(timeout.duration(), Duration::from_secs(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallTimeout(Duration);

impl CallTimeout {
    /// Default bound used when none is configured.
    pub const DEFAULT: Self = Self(Duration::from_secs(10));

    /// Wrap a duration. Zero durations are raised to one millisecond so a
    /// call always gets a chance to complete.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self(duration.max(Duration::from_millis(1)))
    }

    /// The configured duration.
    #[must_use]
    pub fn duration(self) -> Duration {
        self.0
    }

    /// Await `call`, converting an elapsed deadline into the call's own error
    /// type via `on_timeout`.
    pub(crate) async fn bound<T, E, Fut>(
        self,
        call: Fut,
        on_timeout: impl FnOnce(Duration) -> E,
    ) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
    {
        match tokio::time::timeout(self.0, call).await {
            Ok(result) => result,
            Err(_elapsed) => Err(on_timeout(self.0)),
        }
    }
}

impl Default for CallTimeout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn elapsed_deadline_maps_to_caller_error() {
        let timeout = CallTimeout::new(Duration::from_millis(20));
        let result: Result<(), String> = timeout
            .bound(
                async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok(())
                },
                |limit| format!("timed out after {}ms", limit.as_millis()),
            )
            .await;
        assert_eq!(result, Err("timed out after 20ms".to_owned()));
    }

    #[tokio::test]
    async fn completed_call_passes_result_through() {
        let result: Result<u8, String> = CallTimeout::DEFAULT
            .bound(async { Ok(7) }, |_| String::new())
            .await;
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn zero_duration_is_raised() {
        assert_eq!(
            CallTimeout::new(Duration::ZERO).duration(),
            Duration::from_millis(1)
        );
    }
}
