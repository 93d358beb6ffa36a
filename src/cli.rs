//! Command line arguments of `randrctl`

use std::ffi::OsString;

use structopt::{StructOpt, clap::AppSettings};

/// CLI arguments
#[derive(StructOpt, Debug)]
#[structopt(
    name = "randrctl",
    about = "Manages xrandr screen layouts as named profiles.",
    global_settings = &[AppSettings::DisableVersion, AppSettings::VersionlessSubcommands]
)]
struct Opts {
    /// Print version information
    #[structopt(short = "v", long = "version")]
    version: bool,
    /// Be verbose, `-xx` to be even more verbose
    ///
    /// `-x` is counted, so `-x -x` is the same as `-xx`.
    #[structopt(short = "x", parse(from_occurrences))]
    verbosity: u8,
    /// Subcommand to run
    #[structopt(subcommand)]
    cmd: Option<Command>,
}

/// Subcommands to select the mode of operation
#[derive(StructOpt, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch to profile
    SwitchTo {
        /// Name of the profile to switch to
        #[structopt(parse(try_from_str = non_empty_name))]
        profile_name: String,
    },
    /// Show profile
    Show {
        /// Name of the profile to show. Show current setup if omitted
        profile_name: Option<String>,
    },
    /// List available profiles
    List {
        /// Long listing
        #[structopt(short = "l")]
        long_listing: bool,
    },
    /// Dump current screen setup
    Dump {
        /// Name of the profile to dump setup to
        #[structopt(parse(try_from_str = non_empty_name))]
        profile_name: String,
    },
}

/// The result of parsing the command line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedCommand {
    pub command: Option<Command>,
    pub debug: bool,
    pub extended_debug: bool,
    pub version_requested: bool,
}

fn non_empty_name(s: &str) -> Result<String, String> {
    if s.is_empty() {
        Err("profile name must not be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Parses `args`, which exclude the program name
///
/// `-v`/`--version` anywhere wins over everything else, including arguments clap would reject.
pub fn parse<I, T>(args: I) -> Result<ParsedCommand, structopt::clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    if args.iter().any(|a| a == "-v" || a == "--version") {
        return Ok(ParsedCommand {
            version_requested: true,
            ..ParsedCommand::default()
        });
    }

    let argv = std::iter::once(OsString::from("randrctl")).chain(args);
    let opts = Opts::from_iter_safe(argv)?;

    Ok(ParsedCommand {
        command: opts.cmd,
        debug: opts.verbosity >= 1,
        extended_debug: opts.verbosity >= 2,
        version_requested: opts.version,
    })
}

/// Prints the full help text to stdout
pub fn print_help() -> Result<(), structopt::clap::Error> {
    Opts::clap().print_help()?;
    println!();
    Ok(())
}
