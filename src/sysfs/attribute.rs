//! Device attribute table
//!
//! Maps each [`DevInfoType`] to its file under `<device>/device/`, the codec
//! used to read it and the rule used to write it. The table is the only
//! place that knows the driver's sysfs ABI.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Logical device attribute exposed by the amdgpu driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DevInfoType {
    PerfLevel,
    OverDriveLevel,
    MemOverDriveLevel,
    DevId,
    DevProdName,
    DevProdNum,
    VendorId,
    SubSysDevId,
    SubSysVendorId,
    GpuMClk,
    GpuSClk,
    DcefClk,
    FClk,
    SocClk,
    PcieClk,
    PowerProfileMode,
    Usage,
    PowerOdVoltage,
    VBiosVer,
    PcieThruPut,
    ErrCntSdma,
    ErrCntUmc,
    ErrCntGfx,
    ErrCntMmhub,
    ErrCntPcieBif,
    ErrCntHdp,
    ErrCntXgmiWafl,
    ErrCntFeatures,
    MemTotGtt,
    MemTotVisVram,
    MemTotVram,
    MemUsedGtt,
    MemUsedVisVram,
    MemUsedVram,
    VramVendor,
    PcieReplayCount,
    UniqueId,
    DfCountersAvailable,
    MemBusyPercent,
    XgmiError,
    FwVersionAsd,
    FwVersionCe,
    FwVersionDmcu,
    FwVersionMc,
    FwVersionMe,
    FwVersionMec,
    FwVersionMec2,
    FwVersionPfp,
    FwVersionRlc,
    FwVersionRlcSrlc,
    FwVersionRlcSrlg,
    FwVersionRlcSrls,
    FwVersionSdma,
    FwVersionSdma2,
    FwVersionSmc,
    FwVersionSos,
    FwVersionTaRas,
    FwVersionTaXgmi,
    FwVersionUvd,
    FwVersionVce,
    FwVersionVcn,
    SerialNumber,
    MemPageBad,
    NumaNode,
    GpuMetrics,
    /// Lives in debugfs, outside the device directory
    GpuReset,
}

impl fmt::Display for DevInfoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.file_name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{:?}", self),
        }
    }
}

/// How an integer is encoded in a scalar attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NumberFormat {
    /// Base 10
    Decimal,
    /// Base 10, may be negative
    SignedDecimal,
    /// Base 16, `0x` prefix optional
    Hex,
    /// Not numeric
    Text,
}

/// Read strategy for an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Codec {
    /// First whitespace-delimited token
    Scalar(NumberFormat),
    /// First line, spaces preserved
    Line,
    /// Newline-delimited list of records
    MultiLine,
    /// Raw fixed-size block
    Binary,
}

/// Write strategy for an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WriteRule {
    /// Integer written as its decimal string
    Decimal,
    /// Performance level written as its canonical token
    PerfLevel,
    /// Caller string written unchanged
    Verbatim,
}

/// One row of the attribute table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttributeSpec {
    pub attr: DevInfoType,
    /// Path relative to `<device>/device/`
    pub file_name: &'static str,
    pub codec: Codec,
    pub write: Option<WriteRule>,
}

const fn ro(attr: DevInfoType, file_name: &'static str, codec: Codec) -> AttributeSpec {
    AttributeSpec {
        attr,
        file_name,
        codec,
        write: None,
    }
}

const fn rw(
    attr: DevInfoType,
    file_name: &'static str,
    codec: Codec,
    write: WriteRule,
) -> AttributeSpec {
    AttributeSpec {
        attr,
        file_name,
        codec,
        write: Some(write),
    }
}

use Codec::{Binary, Line, MultiLine, Scalar};
use DevInfoType as D;
use NumberFormat::{Decimal, Hex, SignedDecimal, Text};

/// Every attribute that has a file under the device directory
pub static ATTRIBUTE_TABLE: &[AttributeSpec] = &[
    rw(
        D::PerfLevel,
        "power_dpm_force_performance_level",
        Scalar(Text),
        WriteRule::PerfLevel,
    ),
    rw(
        D::OverDriveLevel,
        "pp_sclk_od",
        Scalar(Decimal),
        WriteRule::Decimal,
    ),
    rw(
        D::MemOverDriveLevel,
        "pp_mclk_od",
        Scalar(Decimal),
        WriteRule::Decimal,
    ),
    ro(D::DevId, "device", Scalar(Hex)),
    ro(D::DevProdName, "product_name", Line),
    ro(D::DevProdNum, "product_number", Line),
    ro(D::VendorId, "vendor", Scalar(Hex)),
    ro(D::SubSysDevId, "subsystem_device", Scalar(Hex)),
    ro(D::SubSysVendorId, "subsystem_vendor", Scalar(Hex)),
    rw(D::GpuMClk, "pp_dpm_mclk", MultiLine, WriteRule::Verbatim),
    rw(D::GpuSClk, "pp_dpm_sclk", MultiLine, WriteRule::Verbatim),
    rw(D::DcefClk, "pp_dpm_dcefclk", MultiLine, WriteRule::Verbatim),
    rw(D::FClk, "pp_dpm_fclk", MultiLine, WriteRule::Verbatim),
    rw(D::SocClk, "pp_dpm_socclk", MultiLine, WriteRule::Verbatim),
    rw(D::PcieClk, "pp_dpm_pcie", MultiLine, WriteRule::Verbatim),
    rw(
        D::PowerProfileMode,
        "pp_power_profile_mode",
        MultiLine,
        WriteRule::Decimal,
    ),
    ro(D::Usage, "gpu_busy_percent", Scalar(Decimal)),
    rw(
        D::PowerOdVoltage,
        "pp_od_clk_voltage",
        MultiLine,
        WriteRule::Verbatim,
    ),
    ro(D::VBiosVer, "vbios_version", Scalar(Text)),
    ro(D::PcieThruPut, "pcie_bw", Line),
    ro(D::ErrCntSdma, "ras/sdma_err_count", MultiLine),
    ro(D::ErrCntUmc, "ras/umc_err_count", MultiLine),
    ro(D::ErrCntGfx, "ras/gfx_err_count", MultiLine),
    ro(D::ErrCntMmhub, "ras/mmhub_err_count", MultiLine),
    ro(D::ErrCntPcieBif, "ras/pcie_bif_err_count", MultiLine),
    ro(D::ErrCntHdp, "ras/hdp_err_count", MultiLine),
    ro(D::ErrCntXgmiWafl, "ras/xgmi_wafl_err_count", MultiLine),
    ro(D::ErrCntFeatures, "ras/features", MultiLine),
    ro(D::MemTotGtt, "mem_info_gtt_total", Scalar(Decimal)),
    ro(D::MemTotVisVram, "mem_info_vis_vram_total", Scalar(Decimal)),
    ro(D::MemTotVram, "mem_info_vram_total", Scalar(Decimal)),
    ro(D::MemUsedGtt, "mem_info_gtt_used", Scalar(Decimal)),
    ro(D::MemUsedVisVram, "mem_info_vis_vram_used", Scalar(Decimal)),
    ro(D::MemUsedVram, "mem_info_vram_used", Scalar(Decimal)),
    ro(D::VramVendor, "mem_info_vram_vendor", Line),
    ro(D::PcieReplayCount, "pcie_replay_count", Scalar(Decimal)),
    ro(D::UniqueId, "unique_id", Scalar(Hex)),
    ro(D::DfCountersAvailable, "df_cntr_avail", Scalar(Decimal)),
    ro(D::MemBusyPercent, "mem_busy_percent", Scalar(Decimal)),
    ro(D::XgmiError, "xgmi_error", Scalar(Decimal)),
    ro(D::FwVersionAsd, "fw_version/asd_fw_version", Scalar(Hex)),
    ro(D::FwVersionCe, "fw_version/ce_fw_version", Scalar(Hex)),
    ro(D::FwVersionDmcu, "fw_version/dmcu_fw_version", Scalar(Hex)),
    ro(D::FwVersionMc, "fw_version/mc_fw_version", Scalar(Hex)),
    ro(D::FwVersionMe, "fw_version/me_fw_version", Scalar(Hex)),
    ro(D::FwVersionMec, "fw_version/mec_fw_version", Scalar(Hex)),
    ro(D::FwVersionMec2, "fw_version/mec2_fw_version", Scalar(Hex)),
    ro(D::FwVersionPfp, "fw_version/pfp_fw_version", Scalar(Hex)),
    ro(D::FwVersionRlc, "fw_version/rlc_fw_version", Scalar(Hex)),
    ro(
        D::FwVersionRlcSrlc,
        "fw_version/rlc_srlc_fw_version",
        Scalar(Hex),
    ),
    ro(
        D::FwVersionRlcSrlg,
        "fw_version/rlc_srlg_fw_version",
        Scalar(Hex),
    ),
    ro(
        D::FwVersionRlcSrls,
        "fw_version/rlc_srls_fw_version",
        Scalar(Hex),
    ),
    ro(D::FwVersionSdma, "fw_version/sdma_fw_version", Scalar(Hex)),
    ro(D::FwVersionSdma2, "fw_version/sdma2_fw_version", Scalar(Hex)),
    ro(D::FwVersionSmc, "fw_version/smc_fw_version", Scalar(Hex)),
    ro(D::FwVersionSos, "fw_version/sos_fw_version", Scalar(Hex)),
    ro(D::FwVersionTaRas, "fw_version/ta_ras_fw_version", Scalar(Hex)),
    ro(
        D::FwVersionTaXgmi,
        "fw_version/ta_xgmi_fw_version",
        Scalar(Hex),
    ),
    ro(D::FwVersionUvd, "fw_version/uvd_fw_version", Scalar(Hex)),
    ro(D::FwVersionVce, "fw_version/vce_fw_version", Scalar(Hex)),
    ro(D::FwVersionVcn, "fw_version/vcn_fw_version", Scalar(Hex)),
    ro(D::SerialNumber, "serial_number", Scalar(Text)),
    ro(D::MemPageBad, "ras/gpu_vram_bad_pages", MultiLine),
    ro(D::NumaNode, "numa_node", Scalar(SignedDecimal)),
    ro(D::GpuMetrics, "gpu_metrics", Binary),
];

fn index() -> &'static HashMap<DevInfoType, &'static AttributeSpec> {
    static INDEX: OnceLock<HashMap<DevInfoType, &'static AttributeSpec>> = OnceLock::new();
    INDEX.get_or_init(|| ATTRIBUTE_TABLE.iter().map(|s| (s.attr, s)).collect())
}

impl DevInfoType {
    /// Table row for this attribute, if it has a file under the device directory
    pub fn spec(self) -> Option<&'static AttributeSpec> {
        index().get(&self).copied()
    }

    /// File name relative to `<device>/device/`
    pub fn file_name(self) -> Option<&'static str> {
        self.spec().map(|s| s.file_name)
    }

    /// Reverse lookup by relative file name
    pub fn from_file_name(name: &str) -> Option<Self> {
        ATTRIBUTE_TABLE
            .iter()
            .find(|s| s.file_name == name)
            .map(|s| s.attr)
    }

    /// Whether the attribute is a `pp_dpm_*` clock frequency table
    pub fn is_clock_table(self) -> bool {
        matches!(
            self,
            Self::GpuMClk | Self::GpuSClk | Self::DcefClk | Self::FClk | Self::SocClk | Self::PcieClk
        )
    }
}
