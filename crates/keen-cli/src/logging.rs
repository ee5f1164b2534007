//! Tracing subscriber setup. Events go to stderr so stdout carries only
//! progress output. `RUST_LOG` replaces the `-v`/`-q` level when set.

use std::io::IsTerminal as _;

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

const CRATES: [&str; 3] = ["keen_project_create", "keen_core", "keen_adapters"];

pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = level_for(args.quiet, args.verbose);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives: Vec<String> = CRATES.iter().map(|c| format!("{c}={level}")).collect();
        EnvFilter::new(directives.join(","))
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

fn level_for(quiet: bool, verbose: u8) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::INFO,
        (false, 2) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_level() {
        let cases = [
            (false, 0, LevelFilter::WARN),
            (false, 1, LevelFilter::INFO),
            (false, 2, LevelFilter::DEBUG),
            (false, 3, LevelFilter::TRACE),
            (false, 10, LevelFilter::TRACE),
            (true, 3, LevelFilter::ERROR),
        ];
        for (quiet, verbose, expected) in cases {
            assert_eq!(level_for(quiet, verbose), expected, "quiet={quiet} -v x{verbose}");
        }
    }
}
