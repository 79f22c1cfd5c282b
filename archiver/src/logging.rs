use std::io::Write;

use env_logger::{Builder, Env};

/// Install the process-wide logger. Call once, before anything logs.
///
/// Defaults to `info`; `RUST_LOG` overrides it. Lines look like
/// `2024-05-01 12:00:00,123 - INFO - Found 12 post links.`
pub fn init_logging() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                record.level(),
                record.args()
            )
        })
        .init();
}
