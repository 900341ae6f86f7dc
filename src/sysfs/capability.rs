//! Supported function registry
//!
//! Records which API functions, variants and sub-variants a device supports.
//! Discovery fills it once after the device is constructed; this module only
//! stores and queries the result.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Variant or sub-variant value meaning "no particular variant"
pub const DEFAULT_VARIANT: u64 = u64::MAX;

/// Event groups a device can report counters for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum EventGroup {
    /// XGMI link counters
    Xgmi,
    /// XGMI data-out counters
    XgmiDataOut,
}

/// Function name → variant → sub-variants
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportedFuncMap {
    funcs: BTreeMap<String, BTreeMap<u64, BTreeSet<u64>>>,
}

impl SupportedFuncMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record support for a function/variant/sub-variant triple
    pub fn insert(&mut self, name: impl Into<String>, variant: u64, sub_variant: u64) {
        let subs = self
            .funcs
            .entry(name.into())
            .or_default()
            .entry(variant)
            .or_default();
        if sub_variant != DEFAULT_VARIANT {
            subs.insert(sub_variant);
        }
    }

    /// Whether the function is supported for the given variant pair
    ///
    /// [`DEFAULT_VARIANT`] in either position matches any recorded value.
    pub fn is_supported(&self, name: &str, variant: u64, sub_variant: u64) -> bool {
        let Some(variants) = self.funcs.get(name) else {
            return false;
        };
        if variant == DEFAULT_VARIANT && sub_variant == DEFAULT_VARIANT {
            return true;
        }
        let Some(subs) = variants.get(&variant) else {
            return false;
        };
        sub_variant == DEFAULT_VARIANT || subs.contains(&sub_variant)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.funcs.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }
}

impl fmt::Display for SupportedFuncMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, variants) in &self.funcs {
            writeln!(f, "{}", name)?;
            for (variant, subs) in variants {
                if *variant == DEFAULT_VARIANT {
                    continue;
                }
                write!(f, "  variant {}", variant)?;
                if !subs.is_empty() {
                    let subs: Vec<String> = subs.iter().map(u64::to_string).collect();
                    write!(f, ": {}", subs.join(", "))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_function() {
        let map = SupportedFuncMap::new();
        assert!(!map.is_supported("rsmi_dev_id_get", DEFAULT_VARIANT, DEFAULT_VARIANT));
    }

    #[test]
    fn test_default_variant_matches_any() {
        let mut map = SupportedFuncMap::new();
        map.insert("rsmi_dev_temp_metric_get", 0, 2);
        assert!(map.is_supported("rsmi_dev_temp_metric_get", DEFAULT_VARIANT, DEFAULT_VARIANT));
        assert!(map.is_supported("rsmi_dev_temp_metric_get", 0, DEFAULT_VARIANT));
        assert!(map.is_supported("rsmi_dev_temp_metric_get", 0, 2));
        assert!(!map.is_supported("rsmi_dev_temp_metric_get", 0, 3));
        assert!(!map.is_supported("rsmi_dev_temp_metric_get", 1, DEFAULT_VARIANT));
    }

    #[test]
    fn test_display_lists_variants() {
        let mut map = SupportedFuncMap::new();
        map.insert("rsmi_dev_perf_level_get", DEFAULT_VARIANT, DEFAULT_VARIANT);
        map.insert("rsmi_dev_gpu_clk_freq_get", 1, DEFAULT_VARIANT);
        let dump = map.to_string();
        assert!(dump.contains("rsmi_dev_perf_level_get\n"));
        assert!(dump.contains("  variant 1\n"));
    }
}
