//! proctop - top-style process monitor over the Linux `/proc` filesystem.
//!
//! Usage:
//!   proctop              # refresh every second
//!   proctop 5            # refresh every 5 seconds
//!   proctop --proc-path ./snapshot/proc

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[cfg(not(target_os = "linux"))]
use proctop::collector::MockFs;
#[cfg(target_os = "linux")]
use proctop::collector::RealFs;
use proctop::tui::App;

/// Top-style process monitor for Linux.
#[derive(Parser)]
#[command(name = "proctop", about = "Process monitor over /proc", version)]
struct Args {
    /// Refresh interval in seconds (default: 1).
    #[arg(value_name = "INTERVAL")]
    interval: Option<u64>,

    /// Path to the proc filesystem.
    #[arg(long, default_value = "/proc")]
    proc_path: String,
}

fn main() {
    init_tracing();
    let args = Args::parse();
    let tick_rate = Duration::from_secs(args.interval.unwrap_or(1).max(1));

    #[cfg(target_os = "linux")]
    let fs = RealFs::new();
    // Off Linux there is no /proc to read; run against the built-in fixture.
    #[cfg(not(target_os = "linux"))]
    let fs = MockFs::typical_system();

    let app = App::new(fs, &args.proc_path);
    if let Err(e) = app.run(tick_rate) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, quiet by default; RUST_LOG overrides.
fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("proctop=warn".parse().expect("valid directive"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
