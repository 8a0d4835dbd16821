//! CLI command implementations

pub mod info;
pub mod resample;
pub mod sample;

use anyhow::{Context, Result};
use std::path::Path;
use std::str::FromStr;
use tracing::info;
use volvis_io::fld;
use volvis_volume::{Dims, ScalarField, Vec3};

/// Load volume from path
///
/// Load timing is logged at debug level by the reader itself.
pub fn load_field(path: &Path) -> Result<ScalarField> {
    let field = fld::read(path).with_context(|| format!("Failed to load: {}", path.display()))?;
    info!(
        path = %path.display(),
        dims = %field.dims(),
        voxels = field.dims().len(),
        "Volume loaded"
    );
    Ok(field)
}

/// Parses `x,y,z` into a voxel-space position.
pub fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let (x, y, z) = parse_triple::<f32>(s, &[','])?;
    Ok(Vec3::new(x, y, z))
}

/// Parses `XxYxZ` or `X,Y,Z` into a non-empty extent.
pub fn parse_dims(s: &str) -> Result<Dims, String> {
    let (x, y, z) = parse_triple::<usize>(s, &[',', 'x'])?;
    let dims = Dims::new(x, y, z);
    dims.validate().map_err(|e| e.to_string())?;
    Ok(dims)
}

fn parse_triple<T: FromStr>(s: &str, separators: &[char]) -> Result<(T, T, T), String> {
    let mut parts = s.split(separators).map(|part| {
        let part = part.trim();
        part.parse::<T>()
            .map_err(|_| format!("invalid component '{part}' in '{s}'"))
    });
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(x), Some(y), Some(z), None) => Ok((x?, y?, z?)),
        _ => Err(format!("expected three components, got '{s}'")),
    }
}

/// Human-readable byte count in binary units.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

/// Escapes a string for embedding in hand-written JSON.
pub fn json_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
