use tracing_subscriber::EnvFilter;

/// Crates whose events are shown at the configured level
const OWN_TARGETS: &[&str] = &["pdfgrep", "pdfgrep_cli", "pdfcheck"];

/// Filter directives for `level`: this workspace's crates at `level`, everything
/// else (including `log` records bridged from lopdf) off.
pub fn directives(level: &str) -> String {
    let mut directives = String::from("off");
    for target in OWN_TARGETS {
        directives.push_str(&format!(",{}={}", target, level));
    }
    directives
}

/// Installs the global `tracing` subscriber for the binaries.
///
/// Output goes to stderr so it never mixes with match reports. `RUST_LOG` takes
/// precedence over `level`; an unparsable `level` falls back to `warn`. Without
/// `RUST_LOG`, dependencies never log, so stderr only carries per-file errors.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directives(level)))
        .unwrap_or_else(|_| EnvFilter::new(directives("warn")));

    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
