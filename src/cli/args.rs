//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use crate::domain::{ClockKind, PerformanceLevel};

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// sysfs-based AMD GPU control tool
///
/// Read and change performance levels, clocks, over-drive and power profiles
/// through the amdgpu driver's sysfs files.
#[derive(Parser, Debug)]
#[command(name = "amdctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "AMDCTL_CONFIG")]
    pub config: Option<String>,

    /// Target GPU by DRM card index (cardN)
    #[arg(long, global = true)]
    pub card: Option<u32>,

    /// Target GPU by device directory (e.g. /sys/class/drm/card0)
    #[arg(long, global = true, conflicts_with = "card")]
    pub device_path: Option<PathBuf>,

    /// Log failed attribute file accesses
    #[arg(long, global = true)]
    pub debug_files: bool,

    /// Dry run mode - don't actually apply changes
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show GPU identification and current status
    Info,

    /// Show or set the performance level
    Perf(PerfArgs),

    /// Show or set over-drive percentages
    Overdrive(OverdriveArgs),

    /// Show or restrict clock frequency levels
    Clocks(ClocksArgs),

    /// Show or select the power profile
    Profile(ProfileArgs),

    /// Read one attribute file by name (e.g. pp_dpm_sclk)
    Read {
        /// Attribute file name relative to the device directory
        attribute: String,

        /// Bytes to read from binary attributes
        #[arg(long, default_value = "4")]
        bytes: usize,
    },

    /// List known attributes and whether this GPU exposes them
    Attributes,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for performance level commands
#[derive(Parser, Debug)]
pub struct PerfArgs {
    #[command(subcommand)]
    pub command: PerfCommands,
}

/// Performance level subcommands
#[derive(Subcommand, Debug)]
pub enum PerfCommands {
    /// Show the current performance level
    Status,

    /// Set the performance level
    Set {
        /// Level to set
        #[arg(value_enum)]
        level: PerfLevelArg,
    },
}

/// Performance level argument
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum PerfLevelArg {
    /// Driver-managed clocks
    Auto,
    /// Lowest clocks
    Low,
    /// Highest clocks
    High,
    /// User-selected clock levels
    Manual,
    /// Stable clocks for profiling
    ProfileStandard,
    /// Stable peak clocks
    ProfilePeak,
    /// Stable clocks, minimum memory clock
    ProfileMinMclk,
    /// Stable clocks, minimum shader clock
    ProfileMinSclk,
}

impl From<PerfLevelArg> for PerformanceLevel {
    fn from(arg: PerfLevelArg) -> Self {
        match arg {
            PerfLevelArg::Auto => Self::Auto,
            PerfLevelArg::Low => Self::Low,
            PerfLevelArg::High => Self::High,
            PerfLevelArg::Manual => Self::Manual,
            PerfLevelArg::ProfileStandard => Self::StableStd,
            PerfLevelArg::ProfilePeak => Self::StablePeak,
            PerfLevelArg::ProfileMinMclk => Self::StableMinMclk,
            PerfLevelArg::ProfileMinSclk => Self::StableMinSclk,
        }
    }
}

/// Arguments for over-drive commands
#[derive(Parser, Debug)]
pub struct OverdriveArgs {
    #[command(subcommand)]
    pub command: OverdriveCommands,
}

/// Over-drive subcommands
#[derive(Subcommand, Debug)]
pub enum OverdriveCommands {
    /// Show shader and memory over-drive
    Status,

    /// Set an over-drive percentage
    Set {
        /// Percentage above default clocks (0-20)
        #[arg(value_parser = clap::value_parser!(u32).range(0..=20))]
        percent: u32,

        /// Apply to the memory clock instead of the shader clock
        #[arg(long)]
        memory: bool,
    },
}

/// Arguments for clock commands
#[derive(Parser, Debug)]
pub struct ClocksArgs {
    #[command(subcommand)]
    pub command: ClocksCommands,
}

/// Clock subcommands
#[derive(Subcommand, Debug)]
pub enum ClocksCommands {
    /// Show a clock's frequency levels
    Show {
        /// Clock to show
        #[arg(value_enum, default_value = "sclk")]
        kind: ClockKindArg,
    },

    /// Enable only the given levels (switches to manual performance level)
    Set {
        /// Clock to restrict
        #[arg(value_enum)]
        kind: ClockKindArg,

        /// Level indices to enable
        #[arg(required_unless_present = "mask", conflicts_with = "mask")]
        levels: Vec<u32>,

        /// Bitmask of levels to enable, bit N enabling level N (e.g. 0x5)
        #[arg(long, value_parser = parse_mask)]
        mask: Option<u64>,
    },
}

/// Parse a decimal or `0x`-prefixed hexadecimal level mask
fn parse_mask(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid mask '{}': {}", s, e))
}

/// Clock argument
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ClockKindArg {
    Sclk,
    Mclk,
    Dcefclk,
    Fclk,
    Socclk,
    Pcie,
}

impl From<ClockKindArg> for ClockKind {
    fn from(arg: ClockKindArg) -> Self {
        match arg {
            ClockKindArg::Sclk => Self::Sclk,
            ClockKindArg::Mclk => Self::Mclk,
            ClockKindArg::Dcefclk => Self::Dcefclk,
            ClockKindArg::Fclk => Self::Fclk,
            ClockKindArg::Socclk => Self::Socclk,
            ClockKindArg::Pcie => Self::Pcie,
        }
    }
}

/// Arguments for power profile commands
#[derive(Parser, Debug)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommands,
}

/// Power profile subcommands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List power profiles
    Show,

    /// Activate a power profile (switches to manual performance level)
    Set {
        /// Profile index as listed by `profile show`
        index: u32,
    },
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
