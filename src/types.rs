use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Contains the position of an output on the virtual screen
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a position
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// Errors that occur while parsing a position from a string
#[derive(Error, Debug)]
pub enum ParsePositionError {
    #[error("Error parsing integer")]
    IntError(#[from] std::num::ParseIntError),
    #[error("First part missing")]
    FirstPart,
    #[error("Second part missing. Expected format: <x>x<y>")]
    SecondPart,
    #[error("Unexpected trailing part. Expected format: <x>x<y>")]
    TrailingPart,
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.split('x');
        let x = parts.next().ok_or(ParsePositionError::FirstPart)?.parse()?;
        let y = parts
            .next()
            .ok_or(ParsePositionError::SecondPart)?
            .parse()?;
        if parts.next().is_some() {
            return Err(ParsePositionError::TrailingPart);
        }
        Ok(Self::new(x, y))
    }
}

impl TryFrom<String> for Position {
    type Error = ParsePositionError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(value: Position) -> Self {
        value.to_string()
    }
}

/// Contains the resolution of a mode
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Creates a new resolution
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Swaps width and height, as seen by an output rotated by 90 degrees
    pub fn transposed(self) -> Self {
        Self::new(self.height, self.width)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Errors that occur while parsing a resolution from a string
#[derive(Error, Debug)]
pub enum ParseResolutionError {
    #[error("Error parsing integer")]
    IntError(#[from] std::num::ParseIntError),
    #[error("First integer missing")]
    FirstPart,
    #[error("Second integer missing. Expected format: <width>x<height>")]
    SecondPart,
    #[error("Unexpected trailing part. Expected format: <width>x<height>")]
    TrailingPart,
}

impl FromStr for Resolution {
    type Err = ParseResolutionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.split('x');
        let width = parts
            .next()
            .ok_or(ParseResolutionError::FirstPart)?
            .parse()?;
        let height = parts
            .next()
            .ok_or(ParseResolutionError::SecondPart)?
            .parse()?;
        if parts.next().is_some() {
            return Err(ParseResolutionError::TrailingPart);
        }
        Ok(Self::new(width, height))
    }
}

impl TryFrom<String> for Resolution {
    type Error = ParseResolutionError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Resolution> for String {
    fn from(value: Resolution) -> Self {
        value.to_string()
    }
}

/// Refresh rate in Hz, as reported and accepted by xrandr
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rate(pub f64);

impl Rate {
    pub fn new(v: f64) -> Self {
        Self(v)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[derive(Error, Debug)]
pub enum ParseRateError {
    #[error("Error parsing rate")]
    FloatError(#[from] std::num::ParseFloatError),
    #[error("Rate must be positive: {0}")]
    NotPositive(String),
}

impl FromStr for Rate {
    type Err = ParseRateError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let value = s.trim().parse::<f64>()?;
        if !(value > 0.0 && value.is_finite()) {
            return Err(ParseRateError::NotPositive(s.to_string()));
        }
        Ok(Rate(value))
    }
}

impl TryFrom<String> for Rate {
    type Error = ParseRateError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rate> for String {
    fn from(value: Rate) -> Self {
        value.to_string()
    }
}

/// Output rotation, named the way xrandr's `--rotate` expects it
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Rotation {
    #[default]
    Normal,
    Left,
    Inverted,
    Right,
}

impl Rotation {
    /// Whether the output is turned sideways, i.e. its geometry is transposed
    pub fn is_sideways(&self) -> bool {
        matches!(self, Rotation::Left | Rotation::Right)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rotation::Normal => write!(f, "normal"),
            Rotation::Left => write!(f, "left"),
            Rotation::Inverted => write!(f, "inverted"),
            Rotation::Right => write!(f, "right"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ParseRotationError {
    #[error("Unknown rotation: {0}")]
    UnknownRotation(String),
}

impl FromStr for Rotation {
    type Err = ParseRotationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" | "0" => Ok(Rotation::Normal),
            "left" | "90" => Ok(Rotation::Left),
            "inverted" | "180" => Ok(Rotation::Inverted),
            "right" | "270" => Ok(Rotation::Right),
            _ => Err(ParseRotationError::UnknownRotation(s.to_string())),
        }
    }
}

impl TryFrom<String> for Rotation {
    type Error = ParseRotationError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rotation> for String {
    fn from(value: Rotation) -> Self {
        value.to_string()
    }
}
