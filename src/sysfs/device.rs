//! sysfs device implementation
//!
//! A [`Device`] is one GPU directory (e.g. `/sys/class/drm/card0`). Every
//! accessor call resolves `<path>/device/<file>`, checks it is a regular file
//! and performs one blocking file operation. Nothing is cached.

use crate::domain::PerformanceLevel;
use crate::error::DevInfoError;
use crate::sysfs::attribute::{AttributeSpec, Codec, DevInfoType, NumberFormat, WriteRule};
use crate::sysfs::capability::{EventGroup, SupportedFuncMap};
use crate::sysfs::monitor::{Monitor, PowerMonitor};

use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Environment settings handed to a device at construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceEnv {
    /// Log every failed attribute file access at debug level
    pub debug_file_errors: bool,
}

/// One GPU exposed through sysfs
#[derive(Debug)]
pub struct Device {
    path: PathBuf,
    env: DeviceEnv,
    card_index: u32,
    drm_render_minor: u32,
    bdfid: u64,
    kfd_gpu_id: u64,
    mutex: Mutex<()>,
    monitor: Option<Arc<Monitor>>,
    power_monitor: Option<Arc<PowerMonitor>>,
    supported_funcs: SupportedFuncMap,
    supported_event_groups: HashSet<EventGroup>,
}

impl Device {
    /// Create a device rooted at `path`
    pub fn new(path: impl Into<PathBuf>, env: DeviceEnv) -> Self {
        Self {
            path: path.into(),
            env,
            card_index: 0,
            drm_render_minor: 0,
            bdfid: 0,
            kfd_gpu_id: 0,
            mutex: Mutex::new(()),
            monitor: None,
            power_monitor: None,
            supported_funcs: SupportedFuncMap::new(),
            supported_event_groups: HashSet::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn env(&self) -> DeviceEnv {
        self.env
    }

    /// DRM card index (`cardN`)
    pub fn index(&self) -> u32 {
        self.card_index
    }

    pub fn set_card_index(&mut self, index: u32) {
        self.card_index = index;
    }

    pub fn drm_render_minor(&self) -> u32 {
        self.drm_render_minor
    }

    pub fn set_drm_render_minor(&mut self, minor: u32) {
        self.drm_render_minor = minor;
    }

    pub fn bdfid(&self) -> u64 {
        self.bdfid
    }

    pub fn set_bdfid(&mut self, bdfid: u64) {
        self.bdfid = bdfid;
    }

    pub fn kfd_gpu_id(&self) -> u64 {
        self.kfd_gpu_id
    }

    pub fn set_kfd_gpu_id(&mut self, id: u64) {
        self.kfd_gpu_id = id;
    }

    /// Serialize multi-step operations on this device
    ///
    /// The attribute accessors never take this lock themselves.
    pub fn lock(&self) -> MutexGuard<'_, ()> {
        self.mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn monitor(&self) -> Option<&Arc<Monitor>> {
        self.monitor.as_ref()
    }

    pub fn set_monitor(&mut self, monitor: Option<Arc<Monitor>>) {
        self.monitor = monitor;
    }

    pub fn power_monitor(&self) -> Option<&Arc<PowerMonitor>> {
        self.power_monitor.as_ref()
    }

    pub fn set_power_monitor(&mut self, power_monitor: Option<Arc<PowerMonitor>>) {
        self.power_monitor = power_monitor;
    }

    pub fn supported_funcs_mut(&mut self) -> &mut SupportedFuncMap {
        &mut self.supported_funcs
    }

    pub fn supported_event_groups(&self) -> &HashSet<EventGroup> {
        &self.supported_event_groups
    }

    pub fn supported_event_groups_mut(&mut self) -> &mut HashSet<EventGroup> {
        &mut self.supported_event_groups
    }

    /// Whether discovery recorded support for an API function
    pub fn device_api_supported(&self, name: &str, variant: u64, sub_variant: u64) -> bool {
        self.supported_funcs.is_supported(name, variant, sub_variant)
    }

    /// Absolute path of an attribute file: `<path>/device/<file>`
    pub fn attribute_path(&self, attr: DevInfoType) -> Result<PathBuf, DevInfoError> {
        let name = attr
            .file_name()
            .ok_or(DevInfoError::MissingTableEntry(attr))?;
        Ok(self.path.join("device").join(name))
    }

    // Reads

    /// Read a scalar attribute as a string
    ///
    /// Scalar attributes yield their first whitespace-delimited token (empty
    /// when the file is empty); line attributes yield their whole first line.
    pub fn read_str(&self, attr: DevInfoType) -> Result<String, DevInfoError> {
        let spec = Self::spec(attr, "read_str")?;
        match spec.codec {
            Codec::Scalar(_) => self.read_token(attr),
            Codec::Line => self.read_first_line(attr),
            _ => Err(Self::unsupported(attr, "read_str")),
        }
    }

    /// Read the first line of a scalar or line attribute verbatim
    pub fn read_line(&self, attr: DevInfoType) -> Result<String, DevInfoError> {
        let spec = Self::spec(attr, "read_line")?;
        match spec.codec {
            Codec::Scalar(_) | Codec::Line => self.read_first_line(attr),
            _ => Err(Self::unsupported(attr, "read_line")),
        }
    }

    /// Read a multi-line attribute, one element per line in file order
    pub fn read_lines(&self, attr: DevInfoType) -> Result<Vec<String>, DevInfoError> {
        let spec = Self::spec(attr, "read_lines")?;
        match spec.codec {
            Codec::MultiLine => self.read_all_lines(attr),
            _ => Err(Self::unsupported(attr, "read_lines")),
        }
    }

    /// Fill `buf` from the start of a binary attribute
    ///
    /// The bytes are copied as-is; interpreting them is up to the caller.
    pub fn read_binary(&self, attr: DevInfoType, buf: &mut [u8]) -> Result<(), DevInfoError> {
        let spec = Self::spec(attr, "read_binary")?;
        if spec.codec != Codec::Binary {
            return Err(Self::unsupported(attr, "read_binary"));
        }

        let path = self.checked_path(attr)?;
        let mut file = self.open(&path, OpenOptions::new().read(true))?;
        let expected = buf.len();
        file.read_exact(buf).map_err(|source| {
            self.log_file_error(&path, &source);
            if source.kind() == io::ErrorKind::UnexpectedEof {
                DevInfoError::ShortRead {
                    path: path.clone(),
                    expected,
                }
            } else {
                DevInfoError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })
    }

    /// Read a numeric scalar attribute
    pub fn read_u64(&self, attr: DevInfoType) -> Result<u64, DevInfoError> {
        let spec = Self::spec(attr, "read_u64")?;
        let radix = match spec.codec {
            Codec::Scalar(NumberFormat::Decimal) => 10,
            Codec::Scalar(NumberFormat::Hex) => 16,
            _ => return Err(Self::unsupported(attr, "read_u64")),
        };

        let token = self.read_token(attr)?;
        let digits = if radix == 16 {
            token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(&token)
        } else {
            &token
        };
        u64::from_str_radix(digits, radix).map_err(|_| DevInfoError::Parse {
            attr,
            content: token.clone(),
        })
    }

    /// Read a signed decimal attribute, e.g. `numa_node` which is `-1` when unset
    pub fn read_i64(&self, attr: DevInfoType) -> Result<i64, DevInfoError> {
        let spec = Self::spec(attr, "read_i64")?;
        if !matches!(
            spec.codec,
            Codec::Scalar(NumberFormat::SignedDecimal | NumberFormat::Decimal)
        ) {
            return Err(Self::unsupported(attr, "read_i64"));
        }

        let token = self.read_token(attr)?;
        token.parse().map_err(|_| DevInfoError::Parse {
            attr,
            content: token.clone(),
        })
    }

    /// Read the current performance level
    ///
    /// Unrecognized driver output becomes [`PerformanceLevel::Unknown`].
    pub fn perf_level(&self) -> Result<PerformanceLevel, DevInfoError> {
        let token = self.read_str(DevInfoType::PerfLevel)?;
        Ok(PerformanceLevel::from_sysfs(&token))
    }

    // Writes

    /// Write an integer attribute
    ///
    /// Decimal attributes take the value's decimal string; the performance
    /// level takes a raw [`PerformanceLevel`] value. Range checks are the
    /// caller's job.
    pub fn write_u64(&self, attr: DevInfoType, val: u64) -> Result<(), DevInfoError> {
        let spec = Self::spec(attr, "write_u64")?;
        match spec.write {
            Some(WriteRule::Decimal) => self.write_value(attr, &val.to_string()),
            Some(WriteRule::PerfLevel) => {
                let level = PerformanceLevel::from_raw(val);
                let token = level.as_sysfs_str().ok_or(DevInfoError::InvalidValue {
                    attr,
                    value: val.to_string(),
                })?;
                self.write_value(attr, token)
            }
            Some(WriteRule::Verbatim) | None => Err(Self::unsupported(attr, "write_u64")),
        }
    }

    /// Write a string attribute
    ///
    /// Clock tables and the voltage table take the string verbatim, already
    /// formatted in the driver's syntax. The performance level only accepts a
    /// canonical token.
    pub fn write_str(&self, attr: DevInfoType, val: &str) -> Result<(), DevInfoError> {
        let spec = Self::spec(attr, "write_str")?;
        match spec.write {
            Some(WriteRule::Verbatim) => self.write_value(attr, val),
            Some(WriteRule::PerfLevel) => match PerformanceLevel::from_sysfs(val) {
                PerformanceLevel::Unknown => Err(DevInfoError::InvalidValue {
                    attr,
                    value: val.to_string(),
                }),
                _ => self.write_value(attr, val),
            },
            Some(WriteRule::Decimal) | None => Err(Self::unsupported(attr, "write_str")),
        }
    }

    /// Set the performance level
    pub fn set_perf_level(&self, level: PerformanceLevel) -> Result<(), DevInfoError> {
        self.write_u64(DevInfoType::PerfLevel, level.as_raw())
    }

    // File strategies

    fn spec(attr: DevInfoType, op: &'static str) -> Result<&'static AttributeSpec, DevInfoError> {
        attr.spec().ok_or_else(|| Self::unsupported(attr, op))
    }

    fn unsupported(attr: DevInfoType, op: &'static str) -> DevInfoError {
        DevInfoError::Unsupported { attr, op }
    }

    /// Resolve the attribute path and require a regular file behind it
    fn checked_path(&self, attr: DevInfoType) -> Result<PathBuf, DevInfoError> {
        let path = self.attribute_path(attr)?;
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => {
                self.log_file_message(&path, "not a regular file");
                Err(DevInfoError::NotARegularFile { path })
            }
            Err(err) => {
                self.log_file_error(&path, &err);
                Err(DevInfoError::NotARegularFile { path })
            }
        }
    }

    fn open(&self, path: &Path, options: &OpenOptions) -> Result<File, DevInfoError> {
        options.open(path).map_err(|source| {
            self.log_file_error(path, &source);
            DevInfoError::Open {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    fn io_error(&self, path: &Path, source: io::Error) -> DevInfoError {
        self.log_file_error(path, &source);
        DevInfoError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn read_token(&self, attr: DevInfoType) -> Result<String, DevInfoError> {
        let path = self.checked_path(attr)?;
        let mut file = self.open(&path, OpenOptions::new().read(true))?;

        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|e| self.io_error(&path, e))?;

        let content = String::from_utf8_lossy(&content);
        Ok(content
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string())
    }

    fn read_first_line(&self, attr: DevInfoType) -> Result<String, DevInfoError> {
        let path = self.checked_path(attr)?;
        let file = self.open(&path, OpenOptions::new().read(true))?;

        let mut line = Vec::new();
        BufReader::new(file)
            .read_until(b'\n', &mut line)
            .map_err(|e| self.io_error(&path, e))?;
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        Ok(String::from_utf8_lossy(&line).into_owned())
    }

    fn read_all_lines(&self, attr: DevInfoType) -> Result<Vec<String>, DevInfoError> {
        let path = self.checked_path(attr)?;
        let file = self.open(&path, OpenOptions::new().read(true))?;

        BufReader::new(file)
            .split(b'\n')
            .map(|line| {
                line.map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                    .map_err(|e| self.io_error(&path, e))
            })
            .collect()
    }

    fn write_value(&self, attr: DevInfoType, value: &str) -> Result<(), DevInfoError> {
        let path = self.checked_path(attr)?;
        let mut file = self.open(&path, OpenOptions::new().write(true).truncate(true))?;

        file.write_all(value.as_bytes())
            .map_err(|e| self.io_error(&path, e))?;
        log::trace!("Wrote '{}' to {}", value, path.display());
        Ok(())
    }

    fn log_file_error(&self, path: &Path, err: &io::Error) {
        if self.env.debug_file_errors {
            log::debug!("File error on {}: {}", path.display(), err);
        }
    }

    fn log_file_message(&self, path: &Path, message: &str) {
        if self.env.debug_file_errors {
            log::debug!("File error on {}: {}", path.display(), message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sysfs::capability::DEFAULT_VARIANT;
    use tempfile::TempDir;

    fn fake_device(files: &[(&str, &str)]) -> (TempDir, Device) {
        let dir = tempfile::tempdir().unwrap();
        let device_dir = dir.path().join("device");
        fs::create_dir_all(&device_dir).unwrap();
        for (name, content) in files {
            let path = device_dir.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        let device = Device::new(dir.path(), DeviceEnv::default());
        (dir, device)
    }

    #[test]
    fn test_attribute_path_shape() {
        let device = Device::new("/sys/class/drm/card0", DeviceEnv::default());
        assert_eq!(
            device.attribute_path(DevInfoType::GpuSClk).unwrap(),
            PathBuf::from("/sys/class/drm/card0/device/pp_dpm_sclk")
        );
        assert_eq!(
            device.attribute_path(DevInfoType::ErrCntUmc).unwrap(),
            PathBuf::from("/sys/class/drm/card0/device/ras/umc_err_count")
        );
    }

    #[test]
    fn test_attribute_path_missing_entry() {
        let device = Device::new("/sys/class/drm/card0", DeviceEnv::default());
        let err = device.attribute_path(DevInfoType::GpuReset).unwrap_err();
        assert!(matches!(
            err,
            DevInfoError::MissingTableEntry(DevInfoType::GpuReset)
        ));
    }

    #[test]
    fn test_read_scalar_strips_newline() {
        let (_dir, device) = fake_device(&[("gpu_busy_percent", "42\n")]);
        assert_eq!(device.read_str(DevInfoType::Usage).unwrap(), "42");
        assert_eq!(device.read_u64(DevInfoType::Usage).unwrap(), 42);
    }

    #[test]
    fn test_read_scalar_skips_leading_whitespace() {
        let (_dir, device) = fake_device(&[("vbios_version", "  \n113-EXT-001 extra\n")]);
        assert_eq!(device.read_str(DevInfoType::VBiosVer).unwrap(), "113-EXT-001");
    }

    #[test]
    fn test_read_empty_file() {
        let (_dir, device) = fake_device(&[("power_dpm_force_performance_level", "")]);
        assert_eq!(device.read_str(DevInfoType::PerfLevel).unwrap(), "");
        assert_eq!(device.perf_level().unwrap(), PerformanceLevel::Unknown);
    }

    #[test]
    fn test_read_hex_ids() {
        let (_dir, device) = fake_device(&[("device", "0x744c\n"), ("vendor", "1002\n")]);
        assert_eq!(device.read_u64(DevInfoType::DevId).unwrap(), 0x744c);
        assert_eq!(device.read_u64(DevInfoType::VendorId).unwrap(), 0x1002);
    }

    #[test]
    fn test_read_u64_parse_error() {
        let (_dir, device) = fake_device(&[("gpu_busy_percent", "busy\n")]);
        assert!(matches!(
            device.read_u64(DevInfoType::Usage),
            Err(DevInfoError::Parse { .. })
        ));
    }

    #[test]
    fn test_read_u64_text_attribute_unsupported() {
        let (_dir, device) = fake_device(&[("power_dpm_force_performance_level", "auto\n")]);
        let err = device.read_u64(DevInfoType::PerfLevel).unwrap_err();
        assert_eq!(err.status(), crate::error::STATUS_UNSUPPORTED);
    }

    #[test]
    fn test_read_signed_numa_node() {
        let (dir, device) = fake_device(&[("numa_node", "-1\n")]);
        assert_eq!(device.read_i64(DevInfoType::NumaNode).unwrap(), -1);
        assert!(matches!(
            device.read_u64(DevInfoType::NumaNode),
            Err(DevInfoError::Unsupported { .. })
        ));

        fs::write(dir.path().join("device/numa_node"), "0\n").unwrap();
        assert_eq!(device.read_i64(DevInfoType::NumaNode).unwrap(), 0);
    }

    #[test]
    fn test_read_i64_on_decimal_and_hex() {
        let (_dir, device) = fake_device(&[("pp_sclk_od", "12\n"), ("device", "0x73bf\n")]);
        assert_eq!(device.read_i64(DevInfoType::OverDriveLevel).unwrap(), 12);
        assert!(matches!(
            device.read_i64(DevInfoType::DevId),
            Err(DevInfoError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_read_unique_id_as_hex() {
        let (_dir, device) = fake_device(&[("unique_id", "a1b2c3d4e5f60718\n")]);
        assert_eq!(
            device.read_u64(DevInfoType::UniqueId).unwrap(),
            0xa1b2_c3d4_e5f6_0718
        );
        assert_eq!(
            device.read_line(DevInfoType::UniqueId).unwrap(),
            "a1b2c3d4e5f60718"
        );
    }

    #[test]
    fn test_read_line_keeps_spaces() {
        let (_dir, device) = fake_device(&[("product_name", "AMD Radeon RX 7900 XTX\n")]);
        assert_eq!(
            device.read_line(DevInfoType::DevProdName).unwrap(),
            "AMD Radeon RX 7900 XTX"
        );
        assert_eq!(
            device.read_str(DevInfoType::DevProdName).unwrap(),
            "AMD Radeon RX 7900 XTX"
        );
    }

    #[test]
    fn test_read_lines_order() {
        let (_dir, device) = fake_device(&[("pp_dpm_sclk", "0: 500Mhz\n1: 1800Mhz *\n2: 2500Mhz\n")]);
        let lines = device.read_lines(DevInfoType::GpuSClk).unwrap();
        assert_eq!(lines, vec!["0: 500Mhz", "1: 1800Mhz *", "2: 2500Mhz"]);
    }

    #[test]
    fn test_read_lines_without_trailing_newline() {
        let (_dir, device) = fake_device(&[("pp_dpm_mclk", "0: 96Mhz\n1: 1000Mhz *")]);
        let lines = device.read_lines(DevInfoType::GpuMClk).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "1: 1000Mhz *");
    }

    #[test]
    fn test_read_lines_on_scalar_unsupported() {
        let (_dir, device) = fake_device(&[("gpu_busy_percent", "42\n")]);
        assert!(matches!(
            device.read_lines(DevInfoType::Usage),
            Err(DevInfoError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_read_binary() {
        let (_dir, device) = fake_device(&[("gpu_metrics", "\u{4}\u{1}\u{0}\u{2}rest")]);
        let mut header = [0u8; 4];
        device
            .read_binary(DevInfoType::GpuMetrics, &mut header)
            .unwrap();
        assert_eq!(header, [4, 1, 0, 2]);
    }

    #[test]
    fn test_read_binary_short_file() {
        let (_dir, device) = fake_device(&[("gpu_metrics", "ab")]);
        let mut buf = [0u8; 16];
        let err = device
            .read_binary(DevInfoType::GpuMetrics, &mut buf)
            .unwrap_err();
        assert!(matches!(err, DevInfoError::ShortRead { expected: 16, .. }));
        assert_eq!(err.status(), libc::ENOENT);
    }

    #[test]
    fn test_missing_file_is_not_regular() {
        let (_dir, device) = fake_device(&[]);
        let err = device.read_str(DevInfoType::Usage).unwrap_err();
        assert!(matches!(err, DevInfoError::NotARegularFile { .. }));
        assert_eq!(err.status(), libc::EISDIR);
    }

    #[test]
    fn test_write_decimal() {
        let (dir, device) = fake_device(&[("pp_sclk_od", "0\n")]);
        device.write_u64(DevInfoType::OverDriveLevel, 15).unwrap();
        let content = fs::read_to_string(dir.path().join("device/pp_sclk_od")).unwrap();
        assert_eq!(content, "15");
    }

    #[test]
    fn test_write_truncates() {
        let (dir, device) = fake_device(&[("pp_dpm_sclk", "0: 500Mhz\n1: 1800Mhz *\n")]);
        device.write_str(DevInfoType::GpuSClk, "1").unwrap();
        let content = fs::read_to_string(dir.path().join("device/pp_dpm_sclk")).unwrap();
        assert_eq!(content, "1");
    }

    #[test]
    fn test_write_perf_level_raw() {
        let (dir, device) = fake_device(&[("power_dpm_force_performance_level", "manual\n")]);
        device
            .write_u64(DevInfoType::PerfLevel, PerformanceLevel::Auto.as_raw())
            .unwrap();
        let path = dir.path().join("device/power_dpm_force_performance_level");
        assert_eq!(fs::read(path).unwrap(), b"auto");
        assert_eq!(device.perf_level().unwrap(), PerformanceLevel::Auto);
    }

    #[test]
    fn test_write_unknown_perf_level_rejected() {
        let (dir, device) = fake_device(&[("power_dpm_force_performance_level", "auto\n")]);
        let err = device
            .set_perf_level(PerformanceLevel::Unknown)
            .unwrap_err();
        assert!(matches!(err, DevInfoError::InvalidValue { .. }));

        let err = device
            .write_str(DevInfoType::PerfLevel, "turbo")
            .unwrap_err();
        assert!(matches!(err, DevInfoError::InvalidValue { .. }));

        let path = dir.path().join("device/power_dpm_force_performance_level");
        assert_eq!(fs::read_to_string(path).unwrap(), "auto\n");
    }

    #[test]
    fn test_write_string_to_decimal_attribute_unsupported() {
        let (_dir, device) = fake_device(&[("pp_sclk_od", "0\n")]);
        assert!(matches!(
            device.write_str(DevInfoType::OverDriveLevel, "5"),
            Err(DevInfoError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_write_u64_to_clock_unsupported() {
        let (_dir, device) = fake_device(&[("pp_dpm_sclk", "0: 500Mhz *\n")]);
        assert!(matches!(
            device.write_u64(DevInfoType::GpuSClk, 1),
            Err(DevInfoError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_perf_level_string_round_trip() {
        let (_dir, device) = fake_device(&[("power_dpm_force_performance_level", "manual\n")]);
        device.write_str(DevInfoType::PerfLevel, "auto").unwrap();
        assert_eq!(device.perf_level().unwrap(), PerformanceLevel::Auto);
    }

    #[test]
    fn test_every_canonical_level_round_trips() {
        let (_dir, device) = fake_device(&[("power_dpm_force_performance_level", "auto\n")]);
        for level in PerformanceLevel::all() {
            let token = level.as_sysfs_str().unwrap();
            device.write_str(DevInfoType::PerfLevel, token).unwrap();
            assert_eq!(device.perf_level().unwrap(), *level, "token {}", token);

            device.set_perf_level(*level).unwrap();
            assert_eq!(device.read_str(DevInfoType::PerfLevel).unwrap(), token);
        }
    }

    #[test]
    fn test_unrecognized_perf_level_is_unknown() {
        let (_dir, device) = fake_device(&[("power_dpm_force_performance_level", "turbo\n")]);
        assert_eq!(device.perf_level().unwrap(), PerformanceLevel::Unknown);
    }

    #[test]
    fn test_directory_is_not_regular_and_untouched() {
        let (dir, device) = fake_device(&[]);
        let target = dir.path().join("device/pp_sclk_od");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("marker"), "x").unwrap();

        let err = device.read_u64(DevInfoType::OverDriveLevel).unwrap_err();
        assert!(matches!(err, DevInfoError::NotARegularFile { .. }));
        let err = device.write_u64(DevInfoType::OverDriveLevel, 5).unwrap_err();
        assert!(matches!(err, DevInfoError::NotARegularFile { .. }));

        assert!(target.is_dir());
        assert_eq!(fs::read_to_string(target.join("marker")).unwrap(), "x");
    }

    #[test]
    fn test_unsupported_pair_skips_filesystem() {
        // Base directory does not exist; any access would fail differently.
        let device = Device::new("/nonexistent/card7", DeviceEnv::default());
        let err = device.write_u64(DevInfoType::DevId, 0x1234).unwrap_err();
        assert!(matches!(err, DevInfoError::Unsupported { .. }));
        assert_eq!(err.status(), crate::error::STATUS_UNSUPPORTED);

        let err = device.read_str(DevInfoType::GpuReset).unwrap_err();
        assert!(matches!(err, DevInfoError::Unsupported { .. }));
    }

    #[test]
    fn test_debug_file_errors_still_reports() {
        let device = Device::new(
            "/nonexistent/card7",
            DeviceEnv {
                debug_file_errors: true,
            },
        );
        assert!(matches!(
            device.read_str(DevInfoType::Usage),
            Err(DevInfoError::NotARegularFile { .. })
        ));
    }

    #[test]
    fn test_collaborators_optional_and_shared() {
        let mut device = Device::new("/sys/class/drm/card1", DeviceEnv::default());
        assert!(device.monitor().is_none());

        let monitor = Arc::new(Monitor::new("/sys/class/hwmon/hwmon3", 3));
        device.set_monitor(Some(Arc::clone(&monitor)));
        assert_eq!(Arc::strong_count(&monitor), 2);
        assert_eq!(device.monitor().unwrap().index(), 3);

        device.set_power_monitor(Some(Arc::new(PowerMonitor::new(
            "/sys/kernel/debug/dri/1",
            1,
        ))));
        assert_eq!(device.power_monitor().unwrap().dri_index(), 1);

        device.set_monitor(None);
        assert_eq!(Arc::strong_count(&monitor), 1);
    }

    #[test]
    fn test_identity_setters() {
        let mut device = Device::new("/sys/class/drm/card2", DeviceEnv::default());
        device.set_card_index(2);
        device.set_drm_render_minor(130);
        device.set_bdfid(0x0300);
        device.set_kfd_gpu_id(52_107);
        assert_eq!(device.index(), 2);
        assert_eq!(device.drm_render_minor(), 130);
        assert_eq!(device.bdfid(), 0x0300);
        assert_eq!(device.kfd_gpu_id(), 52_107);
        drop(device.lock());
    }

    #[test]
    fn test_device_api_supported() {
        let mut device = Device::new("/sys/class/drm/card0", DeviceEnv::default());
        assert!(!device.device_api_supported("rsmi_dev_perf_level_get", DEFAULT_VARIANT, DEFAULT_VARIANT));
        device
            .supported_funcs_mut()
            .insert("rsmi_dev_perf_level_get", DEFAULT_VARIANT, DEFAULT_VARIANT);
        device.supported_event_groups_mut().insert(EventGroup::Xgmi);
        assert!(device.device_api_supported("rsmi_dev_perf_level_get", DEFAULT_VARIANT, DEFAULT_VARIANT));
        assert!(device.supported_event_groups().contains(&EventGroup::Xgmi));
    }
}
