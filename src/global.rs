//! # Process-wide facility.
//!
//! Any subsystem in the process must be able to attach a pipe reader or
//! grab a named logger without threading a handle around, so one shared
//! [`LogTee`] lives behind a `OnceLock` for the life of the process. It is
//! initialized lazily from the environment on first use; see
//! [`Config::from_env`].
//!
//! Library code that wants isolation (tests, embedded engines) should use
//! [`LogTee::new`] directly instead of these helpers.

use std::sync::{Arc, OnceLock};

use crate::config::Config;
use crate::logger::Logger;
use crate::pipe::{PipeOpts, PipeReader};
use crate::tee::LogTee;

static TEE: OnceLock<Arc<LogTee>> = OnceLock::new();

fn global() -> &'static Arc<LogTee> {
    TEE.get_or_init(|| LogTee::new(Config::from_env()))
}

/// Returns the process-wide tee.
pub fn tee() -> Arc<LogTee> {
    Arc::clone(global())
}

/// Replaces the process-wide defaults.
///
/// Existing sinks keep the level and format they were created with.
pub fn setup_logging(config: Config) {
    global().set_config(config);
}

/// Returns a named logger bound to the process-wide tee.
pub fn logger(name: impl Into<Arc<str>>) -> Logger {
    global().logger(name)
}

/// Opens a pipe sink on the process-wide tee and returns its reader.
pub fn pipe_reader(opts: PipeOpts) -> PipeReader {
    global().pipe_reader(opts)
}

#[cfg(test)]
mod tests {
    use tokio::io::AsyncReadExt;

    use super::*;

    // The global tee is shared across the whole test binary, so this only
    // makes containment assertions on a unique marker.
    #[tokio::test]
    async fn test_global_helpers_smoke() {
        let reader = pipe_reader(PipeOpts::default());
        let closer = reader.closer();
        let read = tokio::spawn(async move {
            let mut reader = reader;
            let mut out = Vec::new();
            reader.read_to_end(&mut out).await.unwrap();
            String::from_utf8(out).unwrap()
        });

        logger("global-smoke").error("marker-5c1e").await;
        closer.close();

        assert!(read.await.unwrap().contains("marker-5c1e"));
    }
}
