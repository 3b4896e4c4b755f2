use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "tessera_engine::alloc=trace,wgpu_core=warn"). When unset, `RUST_LOG` is
/// consulted, then `default_level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: log::LevelFilter,
    /// Caps the wgpu internals at `warn` unless the filter names them.
    pub quiet_wgpu: bool,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            quiet_wgpu: true,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

const WGPU_TARGETS: [&str; 3] = ["wgpu_core", "wgpu_hal", "naga"];

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Call early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        let filter = config
            .env_filter
            .or_else(|| std::env::var("RUST_LOG").ok());

        if config.quiet_wgpu {
            for target in WGPU_TARGETS {
                builder.filter_module(target, log::LevelFilter::Warn);
            }
        }

        builder.filter_level(config.default_level);
        // Explicit filters go last so they override the defaults above.
        if let Some(filter) = &filter {
            builder.parse_filters(filter);
        }

        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized (filter: {:?})", filter);
    });
}
