use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const ROTATION_MARKER: &[u8] = b"--- Log rotated (older entries removed) ---\n";

/// Size bounds applied to a log file each time it is opened
#[derive(Debug, Clone, Copy)]
struct LogLimits {
    /// Size above which the file is trimmed
    max_bytes: u64,
    /// Approximate tail retained after trimming
    keep_bytes: u64,
}

impl Default for LogLimits {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            keep_bytes: 1024 * 1024,
        }
    }
}

/// Open `path` for appending, first trimming it to its recent tail when it
/// has outgrown `limits`. Only whole lines are kept.
fn open_log_file(path: &Path, limits: LogLimits) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let oversized = fs::metadata(path).is_ok_and(|m| m.len() > limits.max_bytes);
    if oversized {
        let contents = fs::read(path)?;
        let cut = contents.len().saturating_sub(limits.keep_bytes as usize);
        let tail = &contents[cut..];
        let start = if cut == 0 || contents[cut - 1] == b'\n' {
            0
        } else {
            tail.iter().position(|&b| b == b'\n').map_or(tail.len(), |i| i + 1)
        };

        let mut trimmed = Vec::with_capacity(ROTATION_MARKER.len() + tail.len() - start);
        trimmed.extend_from_slice(ROTATION_MARKER);
        trimmed.extend_from_slice(&tail[start..]);
        fs::write(path, trimmed)?;
    }

    OpenOptions::new().create(true).append(true).open(path)
}

fn env_filter(level: &str) -> EnvFilter {
    let default_filter = format!("runway={level},runway_core=warn");
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Initialize logging to stderr, or to `log_file` when one is given.
///
/// A log file is appended to and kept small: once it exceeds 5MB only the
/// last 1MB survives the next start. `RUST_LOG` overrides `level` when set.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> color_eyre::Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(level));

    let Some(log_path) = log_file else {
        registry
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .init();
        return Ok(());
    };

    let file = open_log_file(log_path, LogLimits::default())?;
    registry
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::info!(log_path = %log_path.display(), "logging initialized");
    Ok(())
}
