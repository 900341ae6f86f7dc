//! Raw attribute commands
//!
//! Reads single attribute files and lists the attribute table.

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, AttributeEntry, AttributeList, AttributeValue};
use crate::error::{AppError, DomainError, Result};
use crate::sysfs::{Codec, DevInfoType, Device, ATTRIBUTE_TABLE};

/// Largest binary block `read --bytes` will allocate
pub const MAX_BINARY_READ: usize = 64 * 1024;

/// Read one attribute by file name and print its content
pub fn run_read(device: &Device, attribute: &str, bytes: usize, format: OutputFormat) -> Result<()> {
    let attr = DevInfoType::from_file_name(attribute).ok_or_else(|| {
        AppError::Domain(DomainError::InvalidValue(format!(
            "unknown attribute '{}'",
            attribute
        )))
    })?;

    let lines = read_attribute(device, attr, bytes)?;
    let value = AttributeValue {
        attribute: attribute.to_string(),
        path: device.attribute_path(attr)?.display().to_string(),
        lines,
    };
    print_output(&value, format)?;
    Ok(())
}

/// Read an attribute with the strategy its codec calls for
fn read_attribute(device: &Device, attr: DevInfoType, bytes: usize) -> Result<Vec<String>> {
    let codec = attr.spec().map(|s| s.codec);
    let lines = match codec {
        Some(Codec::MultiLine) => device.read_lines(attr)?,
        Some(Codec::Binary) => {
            if bytes == 0 || bytes > MAX_BINARY_READ {
                return Err(AppError::Domain(DomainError::InvalidValue(format!(
                    "--bytes must be 1-{}, got {}",
                    MAX_BINARY_READ, bytes
                ))));
            }
            let mut buf = vec![0u8; bytes];
            device.read_binary(attr, &mut buf)?;
            vec![hex_dump(&buf)]
        }
        _ => vec![device.read_str(attr)?],
    };
    Ok(lines)
}

fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

fn codec_name(codec: Codec) -> String {
    match codec {
        Codec::Scalar(format) => format!("scalar/{:?}", format).to_lowercase(),
        Codec::Line => "line".to_string(),
        Codec::MultiLine => "multi-line".to_string(),
        Codec::Binary => "binary".to_string(),
    }
}

/// List every table attribute and whether this device exposes it
pub fn run_attributes(device: &Device, format: OutputFormat) -> Result<()> {
    let attributes = ATTRIBUTE_TABLE
        .iter()
        .map(|spec| {
            let present = device
                .attribute_path(spec.attr)
                .map(|p| p.is_file())
                .unwrap_or(false);
            AttributeEntry {
                name: spec.file_name.to_string(),
                codec: codec_name(spec.codec),
                writable: spec.write.is_some(),
                present,
            }
        })
        .collect();

    let list = AttributeList {
        card: device.index(),
        attributes,
    };
    print_output(&list, format)?;
    Ok(())
}
