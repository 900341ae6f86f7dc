//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::domain::{ClockKind, FrequencyTable, PowerProfileTable};
use crate::services::DeviceStatus;
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().trim_end().replace('\n', " | ")
    }
}

fn or_na<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

impl TableDisplay for DeviceStatus {
    fn to_table(&self) -> String {
        let mut output = format!("{}\n", self.info);

        if let (Some(vendor), Some(device)) = (self.info.vendor_id, self.info.device_id) {
            output.push_str(&format!("  PCI ID: {:04x}:{:04x}\n", vendor, device));
        }
        if let (Some(vendor), Some(device)) = (
            self.info.subsystem_vendor_id,
            self.info.subsystem_device_id,
        ) {
            output.push_str(&format!("  Subsystem: {:04x}:{:04x}\n", vendor, device));
        }
        output.push_str(&format!(
            "  VBIOS: {}\n",
            or_na(self.info.vbios_version.as_deref())
        ));
        if let Some(id) = &self.info.unique_id {
            output.push_str(&format!("  Unique ID: {}\n", id));
        }

        output.push_str(&format!(
            "  Performance Level: {}\n",
            or_na(self.perf_level)
        ));
        if let Some(od) = self.overdrive_percent {
            output.push_str(&format!("  Over-drive: {}%\n", od));
        }
        output.push_str(&format!(
            "  GPU Busy: {}\n",
            or_na(self.gpu_busy.map(|b| format!("{}%", b.as_percent())))
        ));
        if let Some(busy) = self.memory_busy {
            output.push_str(&format!("  Memory Busy: {}%\n", busy.as_percent()));
        }
        if let Some(vram) = self.vram {
            output.push_str(&format!(
                "  VRAM: {} / {} MB ({}%)\n",
                vram.used_mb(),
                vram.total_mb(),
                vram.usage_percent()
            ));
        }
        if let Some(gtt) = self.gtt {
            output.push_str(&format!(
                "  GTT: {} / {} MB\n",
                gtt.used_mb(),
                gtt.total_mb()
            ));
        }
        if let Some(count) = self.pcie_replay_count {
            output.push_str(&format!("  PCIe Replay Count: {}\n", count));
        }
        if let Some(node) = self.numa_node.filter(|n| *n >= 0) {
            output.push_str(&format!("  NUMA Node: {}\n", node));
        }

        output
    }

    fn to_compact(&self) -> String {
        format!(
            "{}:{} perf={} busy={}",
            self.info.index,
            self.info.display_name(),
            or_na(self.perf_level),
            or_na(self.gpu_busy.map(|b| b.as_percent()))
        )
    }
}

/// Over-drive status display
#[derive(Debug, Clone, Serialize)]
pub struct OverdriveStatus {
    pub card: u32,
    pub sclk_percent: Option<u64>,
    pub mclk_percent: Option<u64>,
}

impl TableDisplay for OverdriveStatus {
    fn to_table(&self) -> String {
        format!(
            "[{}] Over-drive\n  Shader Clock: {}\n  Memory Clock: {}",
            self.card,
            or_na(self.sclk_percent.map(|p| format!("{}%", p))),
            or_na(self.mclk_percent.map(|p| format!("{}%", p)))
        )
    }
}

/// Frequency table display
#[derive(Debug, Clone, Serialize)]
pub struct ClockTableOutput {
    pub card: u32,
    pub kind: ClockKind,
    pub table: FrequencyTable,
}

impl TableDisplay for ClockTableOutput {
    fn to_table(&self) -> String {
        let mut output = format!("[{}] {} levels\n", self.card, self.kind);
        for level in self.table.levels() {
            let marker = if level.current { " *" } else { "" };
            output.push_str(&format!(
                "  {}: {}{}\n",
                level.index_label(),
                level.label,
                marker
            ));
        }
        output
    }

    fn to_compact(&self) -> String {
        let current = self
            .table
            .current()
            .map(|l| match l.frequency {
                Some(freq) => format!("{}MHz", freq.as_mhz()),
                None => l.label.clone(),
            })
            .unwrap_or_else(|| "N/A".to_string());
        format!("{} {}={}", self.card, self.kind, current)
    }
}

/// Power profile table display
#[derive(Debug, Clone, Serialize)]
pub struct ProfileTableOutput {
    pub card: u32,
    pub table: PowerProfileTable,
}

impl TableDisplay for ProfileTableOutput {
    fn to_table(&self) -> String {
        let mut output = format!("[{}] Power profiles\n", self.card);
        for profile in self.table.profiles() {
            let marker = if profile.active { " *" } else { "" };
            output.push_str(&format!("  {}{}\n", profile, marker));
        }
        output
    }

    fn to_compact(&self) -> String {
        format!(
            "{} profile={}",
            self.card,
            or_na(self.table.active().map(|p| p.name.clone()))
        )
    }
}

/// Raw attribute read result
#[derive(Debug, Clone, Serialize)]
pub struct AttributeValue {
    pub attribute: String,
    pub path: String,
    pub lines: Vec<String>,
}

impl TableDisplay for AttributeValue {
    fn to_table(&self) -> String {
        let mut output = format!("{} ({})\n", self.attribute, self.path);
        for line in &self.lines {
            output.push_str(&format!("  {}\n", line));
        }
        output
    }

    fn to_compact(&self) -> String {
        format!("{}={}", self.attribute, self.lines.join(";"))
    }
}

/// One row of the attribute listing
#[derive(Debug, Clone, Serialize)]
pub struct AttributeEntry {
    pub name: String,
    pub codec: String,
    pub writable: bool,
    pub present: bool,
}

/// Attribute listing display
#[derive(Debug, Clone, Serialize)]
pub struct AttributeList {
    pub card: u32,
    pub attributes: Vec<AttributeEntry>,
}

impl TableDisplay for AttributeList {
    fn to_table(&self) -> String {
        let mut output = format!("[{}] Attributes\n", self.card);
        output.push_str("  Present  Access  Codec             Name\n");
        for entry in &self.attributes {
            output.push_str(&format!(
                "  {:<8} {:<7} {:<17} {}\n",
                if entry.present { "yes" } else { "no" },
                if entry.writable { "rw" } else { "ro" },
                entry.codec,
                entry.name
            ));
        }
        output
    }

    fn to_compact(&self) -> String {
        self.attributes
            .iter()
            .filter(|a| a.present)
            .map(|a| a.name.clone())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Simple message output
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
    pub success: bool,
}

impl TableDisplay for Message {
    fn to_table(&self) -> String {
        if self.success {
            format!("✓ {}", self.message)
        } else {
            format!("✗ {}", self.message)
        }
    }
}
