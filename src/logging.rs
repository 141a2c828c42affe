//! Logging initialisation via tracing-subscriber.
//!
//! Logs go to stderr; stdout is reserved for the JSON-RPC stream.

use tracing_subscriber::EnvFilter;

use crate::error::{QaError, QaResult};

/// Install the global subscriber. `RUST_LOG` wins when set and valid,
/// otherwise `level` is used.
pub fn init(level: &str) -> QaResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| QaError::Logger(format!("invalid log level '{}': {}", level, e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| QaError::Logger(format!("failed to set subscriber: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_succeeds_or_already_set() {
        match init("info") {
            Ok(()) => {}
            Err(QaError::Logger(msg)) if msg.contains("set subscriber") => {}
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
}
