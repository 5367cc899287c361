//! Logging Infrastructure
//!
//! Console output (pretty in development, JSON in production) plus optional
//! daily rotating files under `LOG_DIR`:
//! - `app/`: everything except the `security` target
//! - `security/`: login attempts and role denials (see `security_log!`)

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize the logging system
///
/// `RUST_LOG` overrides `level` when set.
///
/// # Examples
/// ```no_run
/// // Development setup (console only)
/// order_server::utils::logger::init_logger_with_file("debug", false, None)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_filter(level_filter(level))
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(level_filter(level))
            .boxed()
    };
    layers.push(console);

    if let Some(dir) = log_dir {
        let log_dir = Path::new(dir);
        let app_dir = log_dir.join("app");
        let security_dir = log_dir.join("security");
        fs::create_dir_all(&app_dir)?;
        fs::create_dir_all(&security_dir)?;

        let app_log = RollingFileAppender::new(Rotation::DAILY, app_dir, "app");
        layers.push(
            fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::sync::Mutex::new(app_log))
                .with_filter(level_filter(level))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() != "security"
                }))
                .boxed(),
        );

        let security_log = RollingFileAppender::new(Rotation::DAILY, security_dir, "security");
        layers.push(
            fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::sync::Mutex::new(security_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() == "security"
                }))
                .boxed(),
        );
    }

    tracing_subscriber::registry().with(layers).try_init()?;
    Ok(())
}
