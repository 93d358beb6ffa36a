use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Position, Rate, Resolution, Rotation};

/// Settings of a single output within a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Output {
    pub mode: Resolution,
    #[serde(default)]
    pub pos: Position,
    #[serde(default)]
    pub rotate: Rotation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<Rate>,
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}+{}+{} {}",
            self.mode, self.pos.x, self.pos.y, self.rotate
        )?;
        if let Some(rate) = self.rate {
            write!(f, " {}", rate)?;
        }
        Ok(())
    }
}

/// A named screen layout
///
/// The name is not part of the serialized form; it is the file name the
/// profile is stored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(skip)]
    pub name: String,
    pub outputs: BTreeMap<String, Output>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outputs: BTreeMap::new(),
            primary: None,
        }
    }

    /// Reads a profile from its JSON form and attaches `name` to it
    pub fn from_json(name: &str, json: &str) -> serde_json::Result<Self> {
        let mut profile: Profile = serde_json::from_str(json)?;
        profile.name = name.to_string();
        Ok(profile)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn is_primary(&self, output: &str) -> bool {
        self.primary.as_deref() == Some(output)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for (name, output) in &self.outputs {
            write!(f, "\n  {:<10} {}", name, output)?;
            if self.is_primary(name) {
                write!(f, " primary")?;
            }
        }
        Ok(())
    }
}
