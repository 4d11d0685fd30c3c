//! Logging initialization module

use std::sync::Once;
use tracing_subscriber::EnvFilter;

use super::test_capture::init_test_capture;

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at startup of the embedding build tool. Later calls are no-ops,
/// whatever profile they pass. If another global subscriber is already
/// installed it is left in place.
///
/// # Profiles
///
/// - **Development**: Human-readable logs, `taskdelta=debug` unless `RUST_LOG` is set
/// - **Production**: JSON structured logs, `taskdelta=info` unless `RUST_LOG` is set
/// - **Test**: Capture layer shared with [`init_test_capture`]
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("taskdelta=debug")),
                )
                .try_init();
        }
        Profile::Production => {
            let _ = tracing_subscriber::fmt()
                .json()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("taskdelta=info")),
                )
                .try_init();
        }
        Profile::Test => {
            init_test_capture();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
        init(Profile::Development);
    }

    #[test]
    fn test_test_profile_installs_capture() {
        init(Profile::Test);
        let capture = init_test_capture();

        crate::log_op_start!("init_test_profile_capture");

        capture.assert_event_exists("init_test_profile_capture", "start");
    }
}
