//! AVS field (`.fld`) format support.
//!
//! A field file is a short text header followed by raw voxel data.
//!
//! # Format
//!
//! ```text
//! # AVS field file
//! ndim=3          # only 3D volumes
//! dim1=256        # extent along x
//! dim2=256        # extent along y
//! dim3=128        # extent along z
//! nspace=3
//! veclen=1        # scalar data only
//! data=short      # byte | short (little-endian u16)
//! field=uniform   # regular grid only
//! ^L^L<voxel data, x fastest>
//! ```
//!
//! `#` starts a comment and whitespace inside lines is ignored. The header
//! ends at the first line starting with a form feed; exactly two form feeds
//! separate it from the data.
//!
//! # Example
//!
//! ```rust,ignore
//! use volvis_io::fld;
//!
//! let field = fld::read("head.fld")?;
//! fld::write("copy.fld", &field, fld::SampleKind::Short)?;
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::time::Instant;

use tracing::{debug, warn};
use volvis_volume::{Dims, ScalarField, VolumeError};

use crate::{FldError, FldResult};

/// Header/data separator byte.
pub const FORM_FEED: u8 = 0x0c;

/// Storage type of the voxel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleKind {
    /// One unsigned byte per voxel (`data=byte`).
    Byte,
    /// One little-endian `u16` per voxel (`data=short`).
    #[default]
    Short,
}

impl SampleKind {
    /// Bytes per voxel.
    pub const fn size(&self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Short => 2,
        }
    }

    /// Header spelling.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Short => "short",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "byte" => Some(Self::Byte),
            "short" => Some(Self::Short),
            _ => None,
        }
    }
}

/// Parsed header of a field file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FldHeader {
    /// Grid extent
    pub dims: Dims,
    /// Voxel storage type
    pub kind: SampleKind,
}

/// Reads a field file into a [`ScalarField`].
///
/// The path is recorded as the field's provenance.
pub fn read<P: AsRef<Path>>(path: P) -> FldResult<ScalarField> {
    let path = path.as_ref();
    let start = Instant::now();

    let file = File::open(path)?;
    let (header, samples) = parse(BufReader::new(file))?;
    let field = ScalarField::new(samples, header.dims)?.with_provenance(path);

    debug!(
        path = %path.display(),
        dims = %header.dims,
        kind = header.kind.name(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Loaded volume"
    );
    Ok(field)
}

/// Parses a header and its voxel data from a reader.
///
/// Bytes past the declared voxel count are ignored.
pub fn parse<R: BufRead>(mut reader: R) -> FldResult<(FldHeader, Vec<u16>)> {
    let header = parse_header(&mut reader)?;
    let voxels = header.dims.validate()?;
    let expected = voxels
        .checked_mul(header.kind.size())
        .ok_or_else(|| FldError::Unsupported(format!("volume {} is too large", header.dims)))?;

    let mut bytes = Vec::new();
    reader.take(expected as u64).read_to_end(&mut bytes)?;
    if bytes.len() < expected {
        return Err(FldError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }

    Ok((header, decode(&bytes, header.kind)))
}

/// Parses the text header and consumes the form-feed separator.
///
/// Leaves the reader positioned at the first data byte.
pub fn parse_header<R: BufRead>(reader: &mut R) -> FldResult<FldHeader> {
    let mut dims: [Option<usize>; 3] = [None; 3];
    let mut kind = None;
    let mut line_no = 0;
    let mut buf = Vec::new();

    loop {
        match reader.fill_buf()?.first() {
            None => {
                return Err(FldError::Header {
                    line: line_no,
                    message: "missing data section".into(),
                });
            }
            Some(&FORM_FEED) => break,
            Some(_) => {}
        }

        buf.clear();
        reader.read_until(b'\n', &mut buf)?;
        line_no += 1;

        let text = String::from_utf8_lossy(&buf);
        let text = text.split('#').next().unwrap_or_default();
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            continue;
        }

        let Some((key, value)) = compact.split_once('=') else {
            warn!(line = line_no, text = %compact, "Ignoring header line without '='");
            continue;
        };

        match key {
            "ndim" => {
                if parse_int(value, line_no)? != 3 {
                    return Err(FldError::Unsupported(format!(
                        "ndim={value}, only 3D fields are supported"
                    )));
                }
            }
            "dim1" => dims[0] = Some(parse_int(value, line_no)?),
            "dim2" => dims[1] = Some(parse_int(value, line_no)?),
            "dim3" => dims[2] = Some(parse_int(value, line_no)?),
            "nspace" => {}
            "veclen" => {
                if parse_int(value, line_no)? != 1 {
                    return Err(FldError::Unsupported(format!(
                        "veclen={value}, only scalar data is supported"
                    )));
                }
            }
            "data" => {
                kind = Some(SampleKind::from_name(value).ok_or_else(|| {
                    FldError::Unsupported(format!("data type '{value}'"))
                })?);
            }
            "field" => {
                if value != "uniform" {
                    return Err(FldError::Unsupported(format!(
                        "field={value}, only uniform grids are supported"
                    )));
                }
            }
            _ => warn!(line = line_no, key, "Unknown AVS keyword"),
        }
    }

    let mut separator = [0u8; 2];
    reader.read_exact(&mut separator)?;
    if separator != [FORM_FEED; 2] {
        return Err(FldError::Header {
            line: line_no + 1,
            message: "expected two form feeds before data".into(),
        });
    }

    let missing = |what: &str| FldError::Header {
        line: line_no,
        message: format!("missing {what}"),
    };
    let dims = Dims::new(
        dims[0].ok_or_else(|| missing("dim1"))?,
        dims[1].ok_or_else(|| missing("dim2"))?,
        dims[2].ok_or_else(|| missing("dim3"))?,
    );
    let kind = kind.ok_or_else(|| missing("data"))?;

    Ok(FldHeader { dims, kind })
}

/// Writes `field` to a file.
pub fn write<P: AsRef<Path>>(path: P, field: &ScalarField, kind: SampleKind) -> FldResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_to(&mut writer, field.dims(), field.samples(), kind)?;
    writer.flush()?;
    Ok(())
}

/// Writes a header and voxel data to a writer.
///
/// # Errors
///
/// [`FldError::Volume`] if `samples` does not match `dims`,
/// [`FldError::Unsupported`] if a sample exceeds 255 with [`SampleKind::Byte`].
pub fn write_to<W: Write>(mut writer: W, dims: Dims, samples: &[u16], kind: SampleKind) -> FldResult<()> {
    let expected = dims.validate()?;
    if samples.len() != expected {
        return Err(VolumeError::SizeMismatch {
            expected,
            actual: samples.len(),
        }
        .into());
    }

    let bytes: Vec<u8> = match kind {
        SampleKind::Byte => {
            if let Some(&v) = samples.iter().find(|&&v| v > u8::MAX as u16) {
                return Err(FldError::Unsupported(format!(
                    "sample value {v} does not fit data=byte"
                )));
            }
            samples.iter().map(|&v| v as u8).collect()
        }
        SampleKind::Short => samples.iter().flat_map(|v| v.to_le_bytes()).collect(),
    };

    writeln!(writer, "# AVS field file")?;
    writeln!(writer, "# Generated by volvis-io")?;
    writeln!(writer, "ndim=3")?;
    writeln!(writer, "dim1={}", dims.x)?;
    writeln!(writer, "dim2={}", dims.y)?;
    writeln!(writer, "dim3={}", dims.z)?;
    writeln!(writer, "nspace=3")?;
    writeln!(writer, "veclen=1")?;
    writeln!(writer, "data={}", kind.name())?;
    writeln!(writer, "field=uniform")?;
    writer.write_all(&[FORM_FEED, FORM_FEED])?;
    writer.write_all(&bytes)?;

    Ok(())
}

// Helper functions

fn parse_int(value: &str, line: usize) -> FldResult<usize> {
    value.parse().map_err(|_| FldError::Header {
        line,
        message: format!("invalid integer '{value}'"),
    })
}

fn decode(bytes: &[u8], kind: SampleKind) -> Vec<u16> {
    match kind {
        SampleKind::Byte => bytes.iter().map(|&b| b as u16).collect(),
        SampleKind::Short => bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect(),
    }
}
