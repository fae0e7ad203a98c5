use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax
/// (e.g. "warn", "battery_graphics=trace").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Explicit filter. Takes precedence over `RUST_LOG`.
    pub env_filter: Option<String>,
    /// Level used when neither `env_filter` nor `RUST_LOG` is set.
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
    /// Route output through the test harness capture.
    pub is_test: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
            is_test: false,
        }
    }
}

impl LoggingConfig {
    /// Configuration for unit and integration tests: captured output, trace level
    /// unless `RUST_LOG` says otherwise.
    pub fn for_tests() -> Self {
        Self {
            default_level: log::LevelFilter::Trace,
            is_test: true,
            ..Self::default()
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger once.
///
/// Returns `true` if this call installed it. Later calls, or a logger installed
/// by someone else, leave the existing one in place and return `false`.
pub fn init_logging(config: LoggingConfig) -> bool {
    let mut installed = false;

    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter.as_deref() {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(config.default_level);
        }

        builder.write_style(config.write_style);
        builder.is_test(config.is_test);

        installed = builder.try_init().is_ok();

        if installed {
            log::debug!("logging initialized");
        }
    });

    installed
}
