//! Tracing subscriber setup for the `cstar` binary.
//!
//! Library code only emits `tracing` events; the binary decides where they
//! go. `RUST_LOG` overrides the default filter.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Install a stdout subscriber. `verbose` raises the default level from
/// `warn` to `info` so per-subsample progress is shown.
///
/// Colour is only used when stdout is a terminal. Safe to call more than
/// once; later calls are ignored.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stdout)
        .with_ansi(std::io::stdout().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}

fn filter(verbose: bool) -> EnvFilter {
    let default_level = if verbose { "info" } else { "warn" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Written through a buffer, the progress line is plain text.
    #[test]
    fn progress_lines_without_ansi_are_plain() {
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Buffer(Arc<Mutex<Vec<u8>>>);

        impl std::io::Write for Buffer {
            fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(bytes);
                Ok(bytes.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("info"))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Bootstrap #{} of {}", 1, 3);
        });

        let text = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(!text.contains('\u{1b}'), "escape codes in {text:?}");
        assert_eq!(text.trim(), "INFO Bootstrap #1 of 3");
    }

    #[test]
    fn init_is_idempotent() {
        init(false);
        init(true);
        tracing::info!("still fine after re-init");
    }
}
