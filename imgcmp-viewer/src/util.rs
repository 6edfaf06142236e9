//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Default filter for a given `-v` count.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info,wgpu=warn,naga=warn",
        1 => "debug,wgpu=warn,naga=warn",
        _ => "trace,wgpu=info,naga=info",
    }
}

pub fn init_tracing(verbosity: u8) {
    // RUST_LOG=imgcmp_core=debug,wgpu=warn
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity > 0)
        .with_line_number(verbosity > 1)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// Routes panics through tracing so they land in the same log as
/// everything else. The default hook still runs afterwards.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let message = match info.payload().downcast_ref::<&str>() {
            Some(s) => (*s).to_string(),
            None => info
                .payload()
                .downcast_ref::<String>()
                .cloned()
                .unwrap_or_else(|| "non-string panic payload".to_string()),
        };
        let thread = std::thread::current();
        let location = info.location().map(|l| l.to_string());

        tracing::error!(
            thread = thread.name().unwrap_or("unnamed"),
            location = location.as_deref().unwrap_or("unknown"),
            "panic: {message}"
        );
        default_hook(info);
    }));
}
