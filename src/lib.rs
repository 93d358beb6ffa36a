//! A library to keep xrandr screen layouts as named profiles and switch between them.
//!
//! Profiles are stored as JSON files below a home directory and applied by running `xrandr`.
//! The [`RandrCtl`] trait is the surface the command line works against.

pub mod app;
pub mod cli;
pub mod ctl;
pub mod logging;
mod profile;
mod types;
pub mod xrandr;

pub use ctl::{CtlFactory, ProfileCtl, RandrCtl, RandrCtlError};
pub use profile::*;
pub use types::*;
