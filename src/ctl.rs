//! Profile operations exposed to the command line

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{
    profile::Profile,
    xrandr::{Backend, Xrandr, XrandrError, current_profile},
};

/// Directory below the home directory that holds one file per profile
pub const PROFILE_DIR: &str = "profiles";

/// Error type for profile operations
#[derive(Error, Debug)]
pub enum RandrCtlError {
    #[error("Profile {0} not found")]
    ProfileNotFound(String),
    #[error("Invalid profile name: {0:?}")]
    InvalidName(String),
    #[error("Profile {name} is invalid: {source}")]
    InvalidProfile {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("No active outputs found")]
    NoActiveOutputs,
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Xrandr(#[from] XrandrError),
    #[error("Failed to serialize profile: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T = ()> = std::result::Result<T, RandrCtlError>;

/// The operations available on stored profiles and the current setup
pub trait RandrCtl {
    /// Prints the names of all profiles
    fn list_all(&mut self) -> Result;
    /// Prints all profiles together with their outputs
    fn list_all_long(&mut self) -> Result;
    /// Applies the profile called `name`
    fn switch_to(&mut self, name: &str) -> Result;
    /// Prints the profile called `name`
    fn print(&mut self, name: &str) -> Result;
    /// Captures the current setup as profile `name`, storing it when `to_file` is set
    /// and printing it otherwise
    fn dump_current(&mut self, name: &str, to_file: bool) -> Result;
}

/// Builds the controller used by the binary
#[derive(Debug, Clone, Default)]
pub struct CtlFactory {
    xrandr: Xrandr,
}

impl CtlFactory {
    pub fn get_randrctl(&self, home: &Path) -> ProfileCtl<Xrandr, io::Stdout> {
        ProfileCtl::new(home, self.xrandr.clone(), io::stdout())
    }
}

/// Keeps profiles as JSON files and applies them through a [`Backend`]
#[derive(Debug)]
pub struct ProfileCtl<B, W> {
    profile_dir: PathBuf,
    backend: B,
    out: W,
}

impl<B: Backend, W: Write> ProfileCtl<B, W> {
    pub fn new(home: &Path, backend: B, out: W) -> Self {
        Self {
            profile_dir: home.join(PROFILE_DIR),
            backend,
            out,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consumes the controller and returns its output sink
    pub fn into_output(self) -> W {
        self.out
    }

    fn profile_path(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name == "." || name == ".." || name.contains('/') {
            return Err(RandrCtlError::InvalidName(name.to_string()));
        }
        Ok(self.profile_dir.join(name))
    }

    fn load(&self, name: &str) -> Result<Profile> {
        let path = self.profile_path(name)?;
        log::debug!("Reading profile {} from {}", name, path.display());

        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RandrCtlError::ProfileNotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        Profile::from_json(name, &json).map_err(|source| RandrCtlError::InvalidProfile {
            name: name.to_string(),
            source,
        })
    }

    /// Names of all stored profiles, sorted
    fn profile_names(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.profile_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("Profile directory {} does not exist", self.profile_dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn capture(&self, name: &str) -> Result<Profile> {
        let outputs = self.backend.current_outputs()?;
        let profile = current_profile(name, &outputs);
        if profile.outputs.is_empty() {
            return Err(RandrCtlError::NoActiveOutputs);
        }
        Ok(profile)
    }
}

impl<B: Backend, W: Write> RandrCtl for ProfileCtl<B, W> {
    fn list_all(&mut self) -> Result {
        for name in self.profile_names()? {
            writeln!(self.out, "{}", name)?;
        }
        Ok(())
    }

    fn list_all_long(&mut self) -> Result {
        for name in self.profile_names()? {
            let profile = self.load(&name)?;
            writeln!(self.out, "{}", profile)?;
        }
        Ok(())
    }

    fn switch_to(&mut self, name: &str) -> Result {
        let profile = self.load(name)?;
        let current = self.backend.current_outputs()?;
        self.backend.apply(&profile, &current)?;
        log::info!("Switched to profile {}", name);
        Ok(())
    }

    fn print(&mut self, name: &str) -> Result {
        let profile = self.load(name)?;
        writeln!(self.out, "{}", profile.to_json()?)?;
        Ok(())
    }

    fn dump_current(&mut self, name: &str, to_file: bool) -> Result {
        let path = self.profile_path(name)?;
        let profile = self.capture(name)?;
        let json = profile.to_json()?;

        if to_file {
            fs::create_dir_all(&self.profile_dir)?;
            fs::write(&path, format!("{}\n", json))?;
            log::info!("Saved current setup as profile {} to {}", name, path.display());
        } else {
            writeln!(self.out, "{}", json)?;
        }
        Ok(())
    }
}
