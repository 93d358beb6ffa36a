//! Ties argument parsing, logging and the profile controller together

use std::path::Path;

use color_eyre::eyre::Result;

use crate::{
    cli::{self, Command, ParsedCommand},
    ctl::{self, RandrCtl},
    logging::{self, LogPolicy},
};

/// Where profiles are looked up
pub const HOME_DIR: &str = "/etc/randrctl";

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Profile name used by `show` when no name is given
pub const CURRENT: &str = "current";

/// Runs the controller operation that belongs to `command`
pub fn dispatch<C: RandrCtl + ?Sized>(command: &Command, ctl: &mut C) -> ctl::Result {
    match command {
        Command::List { long_listing: true } => ctl.list_all_long(),
        Command::List {
            long_listing: false,
        } => ctl.list_all(),
        Command::SwitchTo { profile_name } => ctl.switch_to(profile_name),
        Command::Show {
            profile_name: Some(profile_name),
        } if !profile_name.is_empty() => ctl.print(profile_name),
        // an empty name counts as no name
        Command::Show { .. } => ctl.dump_current(CURRENT, false),
        Command::Dump { profile_name } => ctl.dump_current(profile_name, true),
    }
}

/// Executes a parsed command line and returns the process exit code
///
/// `factory` is only called once a command is about to be dispatched.
pub fn run<C, F>(parsed: ParsedCommand, factory: F) -> Result<i32>
where
    C: RandrCtl,
    F: FnOnce(&Path) -> C,
{
    if parsed.version_requested {
        println!("{}", VERSION);
        return Ok(0);
    }

    let Some(command) = parsed.command else {
        cli::print_help()?;
        return Ok(1);
    };

    logging::init(LogPolicy::from_flags(parsed.debug, parsed.extended_debug));
    log::debug!("Parsed command: {:?}", command);

    let mut ctl = factory(Path::new(HOME_DIR));

    match dispatch(&command, &mut ctl) {
        Ok(()) => Ok(0),
        Err(e) => {
            log::error!("{}", e);
            Ok(1)
        }
    }
}
