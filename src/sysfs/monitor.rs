//! Monitor collaborator handles
//!
//! A device shares these with other holders; the attribute accessor never
//! reads through them.

use std::path::{Path, PathBuf};

/// hwmon directory serving per-sensor readings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monitor {
    path: PathBuf,
    index: u32,
}

impl Monitor {
    pub fn new(path: impl Into<PathBuf>, index: u32) -> Self {
        Self {
            path: path.into(),
            index,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

/// debugfs directory serving power readings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerMonitor {
    path: PathBuf,
    dri_index: u32,
}

impl PowerMonitor {
    pub fn new(path: impl Into<PathBuf>, dri_index: u32) -> Self {
        Self {
            path: path.into(),
            dri_index,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dri_index(&self) -> u32 {
        self.dri_index
    }
}
