pub fn setup_logging(verbose_level: u8) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        // Use RUST_LOG if set
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        // Map verbosity count to filters
        let filter_str = match verbose_level {
            0 => "warn,browser_assistant=info,page_driver=info",
            1 => "info,browser_assistant=debug,page_driver=debug",
            _ => "debug,browser_assistant=trace,page_driver=trace",
        };
        tracing_subscriber::EnvFilter::new(filter_str)
    };

    // Logs go to stderr; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
