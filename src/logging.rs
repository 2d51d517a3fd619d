/// Initialize the logger with the specified verbosity level
///
/// Does nothing when the host application already installed a logger.
///
/// # Arguments
/// * `verbose` - Verbosity level (0=warn, 1=info, 2=debug, 3+=trace)
pub fn setup_logger(verbose: u8) {
    let env_filter = default_filter(verbose);

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(env_filter))
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init();
}

fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "hostprobe=warn",
        1 => "hostprobe=info",
        2 => "hostprobe=debug",
        _ => "hostprobe=trace",
    }
}
