//! x86v: report the x86-64 microarchitecture levels of the running processor.
//!
//! Prints one line per supported level, lowest first:
//!
//! ```text
//! x86-64 v1 supported (fpu cx8 sce cmov mmx fxsr sse sse2)
//! x86-64 v2 supported (cmpxchg16b popcnt sse3 sse4.1 sse4.2 ssse3 lahf_sahf)
//! ```
//!
//! Diagnostics go to stderr and are controlled by `X86V_LOG`
//! (`warn` by default).

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use x86v_core::{Classifier, Report};
use x86v_hal::{CpuidSnapshot, NativeCpuid};

/// Environment variable holding the log filter
const LOG_ENV: &str = "X86V_LOG";

const USAGE: &str = "Just run the x86v command. Use the '-h' flag to show this output.";

#[derive(Parser, Debug)]
#[command(name = "x86v")]
#[command(about = "Print the x86-64 microarchitecture levels supported by this processor")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Show usage
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    help: bool,
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(LOG_ENV, "warn"))
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

fn run(out: &mut impl Write) -> Result<()> {
    let snapshot = CpuidSnapshot::capture(&NativeCpuid);
    log::info!("Vendor: {:?}", snapshot.vendor());

    let classification = Classifier::new().classify(&snapshot);
    match classification.highest() {
        Some(level) => log::info!("Highest supported level: {level}"),
        None => log::warn!("No x86-64 level is fully supported"),
    }

    write!(out, "{}", Report::new(&classification)).context("Failed to write report")?;
    out.flush().context("Failed to flush stdout")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.help {
        writeln!(out, "{USAGE}").context("Failed to write usage")?;
        return Ok(());
    }

    run(&mut out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_help_flags() {
        assert!(Cli::try_parse_from(["x86v", "-h"]).map(|c| c.help).unwrap_or(false));
        assert!(Cli::try_parse_from(["x86v", "--help"]).map(|c| c.help).unwrap_or(false));
        assert!(!Cli::try_parse_from(["x86v"]).map(|c| c.help).unwrap_or(true));
    }

    #[test]
    fn rejects_other_arguments() {
        assert!(Cli::try_parse_from(["x86v", "--bogus"]).is_err());
        assert!(Cli::try_parse_from(["x86v", "extra"]).is_err());
        assert!(Cli::try_parse_from(["x86v", "-V"]).is_err());
    }

    #[test]
    fn run_writes_report_lines() {
        let mut buf = Vec::new();
        run(&mut buf).expect("report written to buffer");
        let text = String::from_utf8(buf).expect("report is UTF-8");
        for line in text.lines() {
            assert!(line.starts_with("x86-64 v"), "unexpected line: {line}");
            assert!(line.ends_with(')'));
        }
        #[cfg(target_arch = "x86_64")]
        assert!(text.starts_with("x86-64 v1 supported ("));
    }
}
