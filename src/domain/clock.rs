//! Clock domain types
//!
//! Types for `pp_dpm_*` frequency tables and clock level selections.

use crate::error::DomainError;
use crate::sysfs::DevInfoType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// GPU clock speed in MHz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClockSpeed(u32);

impl ClockSpeed {
    /// Create a new clock speed value
    pub fn new(mhz: u32) -> Self {
        Self(mhz)
    }

    /// Get clock speed in MHz
    pub fn as_mhz(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ClockSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} MHz", self.0)
    }
}

/// Clock domain with a selectable frequency table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClockKind {
    /// Shader/graphics clock
    Sclk,
    /// Memory clock
    Mclk,
    /// Display controller clock
    Dcefclk,
    /// Data fabric clock
    Fclk,
    /// SoC clock
    Socclk,
    /// PCIe link speed
    Pcie,
}

impl ClockKind {
    /// Attribute holding this clock's frequency table
    pub fn attribute(&self) -> DevInfoType {
        match self {
            Self::Sclk => DevInfoType::GpuSClk,
            Self::Mclk => DevInfoType::GpuMClk,
            Self::Dcefclk => DevInfoType::DcefClk,
            Self::Fclk => DevInfoType::FClk,
            Self::Socclk => DevInfoType::SocClk,
            Self::Pcie => DevInfoType::PcieClk,
        }
    }
}

impl fmt::Display for ClockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sclk => "sclk",
            Self::Mclk => "mclk",
            Self::Dcefclk => "dcefclk",
            Self::Fclk => "fclk",
            Self::Socclk => "socclk",
            Self::Pcie => "pcie",
        };
        write!(f, "{}", name)
    }
}

/// Index label of the deep-sleep row some SMU firmware prints
const DEEP_SLEEP_LABEL: &str = "S";

/// One row of a frequency table, e.g. `1: 1000Mhz *`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockLevel {
    /// `None` for the deep-sleep row (`S: 19Mhz *`), which cannot be selected
    pub index: Option<u32>,
    /// Text after the index with the active marker removed
    pub label: String,
    pub frequency: Option<ClockSpeed>,
    /// Marked with `*` by the driver
    pub current: bool,
}

impl ClockLevel {
    /// Parse one frequency table line
    pub fn parse(line: &str) -> Result<Self, DomainError> {
        let malformed = || DomainError::MalformedLine(line.to_string());

        let (index, rest) = line.split_once(':').ok_or_else(malformed)?;
        let index = match index.trim() {
            DEEP_SLEEP_LABEL => None,
            n => Some(n.parse::<u32>().map_err(|_| malformed())?),
        };

        let mut label = rest.trim();
        let current = label.ends_with('*');
        if current {
            label = label.trim_end_matches('*').trim_end();
        }

        let frequency = label
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter_map(parse_mhz)
            .last()
            .map(ClockSpeed::new);

        Ok(Self {
            index,
            label: label.to_string(),
            frequency,
            current,
        })
    }

    pub fn is_deep_sleep(&self) -> bool {
        self.index.is_none()
    }

    /// Index as the driver prints it
    pub fn index_label(&self) -> String {
        match self.index {
            Some(index) => index.to_string(),
            None => DEEP_SLEEP_LABEL.to_string(),
        }
    }
}

fn parse_mhz(token: &str) -> Option<u32> {
    let lower = token.to_ascii_lowercase();
    lower.strip_suffix("mhz")?.parse().ok()
}

/// Parsed `pp_dpm_*` frequency table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrequencyTable {
    levels: Vec<ClockLevel>,
}

impl FrequencyTable {
    /// Parse the lines returned by a multi-line attribute read
    ///
    /// Blank lines are skipped; any other unparseable line is an error.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Self, DomainError> {
        let levels = lines
            .iter()
            .map(AsRef::as_ref)
            .filter(|l| !l.trim().is_empty())
            .map(ClockLevel::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[ClockLevel] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level currently marked active
    pub fn current(&self) -> Option<&ClockLevel> {
        self.levels.iter().find(|l| l.current)
    }

    pub fn contains(&self, index: u32) -> bool {
        self.levels.iter().any(|l| l.index == Some(index))
    }
}

/// Set of clock levels to enable, written as space-separated indices
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClockSelection(BTreeSet<u32>);

impl ClockSelection {
    /// Create a selection from level indices
    pub fn from_indices<I: IntoIterator<Item = u32>>(indices: I) -> Result<Self, DomainError> {
        let set: BTreeSet<u32> = indices.into_iter().collect();
        if set.is_empty() {
            return Err(DomainError::InvalidClockLevel(
                "at least one level must be selected".to_string(),
            ));
        }
        Ok(Self(set))
    }

    /// Create a selection from a bitmask, bit N enabling level N
    pub fn from_bitmask(mask: u64) -> Result<Self, DomainError> {
        Self::from_indices((0..64).filter(|bit| mask & (1u64 << bit) != 0))
    }

    /// Check every selected level exists in the table
    pub fn validate(&self, table: &FrequencyTable) -> Result<(), DomainError> {
        match self.0.iter().find(|i| !table.contains(**i)) {
            Some(missing) => Err(DomainError::InvalidClockLevel(format!(
                "level {} not in table of {} levels",
                missing,
                table.len()
            ))),
            None => Ok(()),
        }
    }

    /// String in the driver's expected syntax, e.g. `"0 2 3"`
    pub fn to_sysfs_string(&self) -> String {
        self.0
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
