use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout stays usable for JSON and advice text.
pub fn setup_logger(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default))
        .add_directive("hyper=warn".parse().expect("static directive"))
        .add_directive("reqwest=warn".parse().expect("static directive"));

    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .compact()
        .with_env_filter(filter)
        .init();
}
