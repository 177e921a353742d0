pub mod commands;

/// Initialize stderr logging. Defaults to `warn`; `RUST_LOG` overrides it.
///
/// Nothing is ever logged to stdout, which carries the report.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    // Repeated initialization (e.g. from tests) is ignored.
    let _ = env_logger::Builder::from_env(env).format_timestamp(None).try_init();
}
