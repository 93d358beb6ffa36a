//! The CLI interface for randrctl
//!
//! Use the `--help` flag to see the available options.
use color_eyre::eyre::Result;
use randrctl::{CtlFactory, app, cli};

/// Entry point for `randrctl`.
fn main() -> Result<()> {
    color_eyre::install()?;

    let parsed = match cli::parse(std::env::args_os().skip(1)) {
        Ok(parsed) => parsed,
        Err(e) => e.exit(),
    };

    let factory = CtlFactory::default();
    let code = app::run(parsed, |home| factory.get_randrctl(home))?;

    std::process::exit(code)
}
