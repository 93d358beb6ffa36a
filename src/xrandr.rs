use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

use crate::{
    profile::{Output, Profile},
    types::{Position, Rate, Resolution, Rotation},
};

/// Error type for the xrandr module
#[derive(Error, Debug)]
pub enum XrandrError {
    #[error("Failed to run {0}: {1}")]
    Spawn(String, #[source] std::io::Error),
    #[error("xrandr exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("Unexpected xrandr output: {0}")]
    Parse(String),
    #[error("Output {0} is not connected")]
    NotConnected(String),
}

type Result<T = ()> = std::result::Result<T, XrandrError>;

/// State of one output as reported by `xrandr --query`
#[derive(Debug, Clone, PartialEq)]
pub struct OutputState {
    pub name: String,
    pub connected: bool,
    pub primary: bool,
    /// Unrotated mode and position, present only when the output is active
    pub geometry: Option<(Resolution, Position)>,
    pub rotation: Rotation,
    pub rate: Option<Rate>,
}

impl OutputState {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            connected: false,
            primary: false,
            geometry: None,
            rotation: Rotation::default(),
            rate: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.geometry.is_some()
    }
}

/// Queries and changes the screen layout
pub trait Backend {
    /// Returns every output known to the display server
    fn current_outputs(&self) -> Result<Vec<OutputState>>;

    /// Makes `profile` the active layout, switching off every other output in `current`
    fn apply(&self, profile: &Profile, current: &[OutputState]) -> Result;
}

/// Runs the `xrandr` executable
#[derive(Debug, Clone)]
pub struct Xrandr {
    executable: PathBuf,
}

impl Default for Xrandr {
    fn default() -> Self {
        Self::new("xrandr")
    }
}

impl Xrandr {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    fn run(&self, args: &[String]) -> Result<String> {
        log::debug!("Running {} {}", self.executable.display(), args.join(" "));

        let output = Command::new(&self.executable)
            .args(args)
            .output()
            .map_err(|e| XrandrError::Spawn(self.executable.display().to_string(), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            log::debug!("xrandr failed: {}", stderr);
            return Err(XrandrError::Failed {
                status: output.status.to_string(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Backend for Xrandr {
    fn current_outputs(&self) -> Result<Vec<OutputState>> {
        let stdout = self.run(&["--query".to_string()])?;
        parse_query(&stdout)
    }

    fn apply(&self, profile: &Profile, current: &[OutputState]) -> Result {
        let args = apply_args(profile, current)?;
        self.run(&args)?;
        log::debug!("Applied profile {}", profile.name);
        Ok(())
    }
}

/// Parses the output of `xrandr --query`
pub fn parse_query(text: &str) -> Result<Vec<OutputState>> {
    let mut outputs: Vec<OutputState> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() || line.starts_with("Screen ") {
            continue;
        }

        if line.starts_with(char::is_whitespace) {
            // mode line of the preceding output
            if let Some(output) = outputs.last_mut() {
                if let Some(rate) = parse_current_rate(line)? {
                    output.rate = Some(rate);
                }
            }
            continue;
        }

        outputs.push(parse_output_line(line)?);
    }

    if outputs.is_empty() {
        return Err(XrandrError::Parse("no outputs found".to_string()));
    }

    for output in &outputs {
        log::debug!(
            "Output {}: connected={} primary={} geometry={:?} rotation={}",
            output.name,
            output.connected,
            output.primary,
            output.geometry,
            output.rotation
        );
    }

    Ok(outputs)
}

fn parse_output_line(line: &str) -> Result<OutputState> {
    let mut tokens = line.split_whitespace();
    let name = tokens
        .next()
        .ok_or_else(|| XrandrError::Parse(line.to_string()))?;
    let mut output = OutputState::new(name);
    output.connected = tokens.next() == Some("connected");

    let mut size = None;
    for token in tokens.take_while(|t| !t.starts_with('(')) {
        if token == "primary" {
            output.primary = true;
        } else if token.contains('+') {
            size = Some(parse_geometry(token)?);
        } else if let Ok(rotation) = token.parse::<Rotation>() {
            output.rotation = rotation;
        }
    }

    // xrandr reports the rotated size; profiles store the mode itself
    let sideways = output.rotation.is_sideways();
    output.geometry = size.map(|(resolution, position): (Resolution, Position)| {
        if sideways {
            (resolution.transposed(), position)
        } else {
            (resolution, position)
        }
    });

    Ok(output)
}

/// Parses `WxH+X+Y`
fn parse_geometry(token: &str) -> Result<(Resolution, Position)> {
    let invalid = || XrandrError::Parse(format!("invalid geometry {}", token));

    let mut parts = token.splitn(3, '+');
    let resolution = parts
        .next()
        .and_then(|s| s.parse::<Resolution>().ok())
        .ok_or_else(invalid)?;
    let x = parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(invalid)?;
    let y = parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(invalid)?;

    Ok((resolution, Position::new(x, y)))
}

/// Returns the rate marked as current (`*`) on a mode line, if any
fn parse_current_rate(line: &str) -> Result<Option<Rate>> {
    let Some(token) = line.split_whitespace().skip(1).find(|t| t.contains('*')) else {
        return Ok(None);
    };
    let rate = token
        .trim_end_matches(['*', '+'])
        .parse::<Rate>()
        .map_err(|e| XrandrError::Parse(format!("invalid rate {}: {}", token, e)))?;
    Ok(Some(rate))
}

/// Captures the active outputs as a profile called `name`
pub fn current_profile(name: &str, outputs: &[OutputState]) -> Profile {
    let mut profile = Profile::new(name);

    for output in outputs {
        let Some((mode, pos)) = output.geometry else {
            continue;
        };
        profile.outputs.insert(
            output.name.clone(),
            Output {
                mode,
                pos,
                rotate: output.rotation,
                rate: output.rate,
            },
        );
        if output.primary {
            profile.primary = Some(output.name.clone());
        }
    }

    profile
}

/// Builds the xrandr arguments that switch from `current` to `profile`
pub fn apply_args(profile: &Profile, current: &[OutputState]) -> Result<Vec<String>> {
    let mut args = Vec::new();

    for (name, output) in &profile.outputs {
        if !current.iter().any(|o| &o.name == name && o.connected) {
            return Err(XrandrError::NotConnected(name.clone()));
        }

        args.extend([
            "--output".to_string(),
            name.clone(),
            "--mode".to_string(),
            output.mode.to_string(),
            "--pos".to_string(),
            output.pos.to_string(),
            "--rotate".to_string(),
            output.rotate.to_string(),
        ]);
        if let Some(rate) = output.rate {
            args.extend(["--rate".to_string(), rate.to_string()]);
        }
        if profile.is_primary(name) {
            args.push("--primary".to_string());
        }
    }

    for output in current
        .iter()
        .filter(|o| !profile.outputs.contains_key(&o.name))
    {
        args.extend([
            "--output".to_string(),
            output.name.clone(),
            "--off".to_string(),
        ]);
    }

    Ok(args)
}
