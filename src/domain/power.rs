//! Power profile domain types
//!
//! Parses the `pp_power_profile_mode` table. The driver prints a header and,
//! depending on the ASIC, per-clock detail rows; only rows of the form
//! `<index> <NAME>[*]:` name a selectable profile.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One selectable power profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerProfile {
    pub index: u32,
    pub name: String,
    /// Marked with `*` by the driver
    pub active: bool,
}

impl PowerProfile {
    /// Parse a profile row, `None` for header and detail rows
    pub fn parse(line: &str) -> Option<Self> {
        let (head, _) = line.split_once(':')?;
        let mut tokens = head.split_whitespace();
        let index: u32 = tokens.next()?.parse().ok()?;

        let rest: String = tokens.collect::<Vec<_>>().join(" ");
        let active = rest.contains('*');
        let name = rest.replace('*', "").trim().to_string();
        if name.is_empty() {
            return None;
        }

        Some(Self {
            index,
            name,
            active,
        })
    }
}

impl fmt::Display for PowerProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.index, self.name)
    }
}

/// Parsed power profile table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PowerProfileTable {
    profiles: Vec<PowerProfile>,
}

impl PowerProfileTable {
    /// Parse the lines returned by a multi-line attribute read
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Self {
        let profiles = lines
            .iter()
            .filter_map(|l| PowerProfile::parse(l.as_ref()))
            .collect();
        Self { profiles }
    }

    pub fn profiles(&self) -> &[PowerProfile] {
        &self.profiles
    }

    /// Profile currently marked active
    pub fn active(&self) -> Option<&PowerProfile> {
        self.profiles.iter().find(|p| p.active)
    }

    /// Look up a profile by index, failing if it is not listed
    pub fn get(&self, index: u32) -> Result<&PowerProfile, DomainError> {
        self.profiles
            .iter()
            .find(|p| p.index == index)
            .ok_or(DomainError::InvalidPowerProfile(index))
    }
}
