//! Tracing subscriber initialisation.
//!
//! The compiler crate only emits events; the binary owns the subscriber.
//!
//! | Flag(s)   | Filter level |
//! |-----------|--------------|
//! | (none)    | WARN         |
//! | `-v`      | INFO         |
//! | `-vv`     | DEBUG        |
//! | `-vvv`    | TRACE        |
//! | `--quiet` | ERROR        |
//!
//! `RUST_LOG` overrides all of the above if set.

use std::io::IsTerminal as _;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::GlobalArgs;

/// Installs the global subscriber, writing to stderr.
pub fn init_logging(args: &GlobalArgs) -> miette::Result<()> {
    let level = derive_level(args);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("apigen={level},apigen_compiler={level}")));

    let use_ansi = !args.no_color && std::io::stderr().is_terminal();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| miette::miette!("Failed to initialise tracing: {e}"))
}

fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: false,
        }
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(derive_level(&args(0, false)), "warn");
        assert_eq!(derive_level(&args(1, false)), "info");
        assert_eq!(derive_level(&args(2, false)), "debug");
        assert_eq!(derive_level(&args(5, false)), "trace");
    }

    #[test]
    fn quiet_wins() {
        assert_eq!(derive_level(&args(0, true)), "error");
    }
}
