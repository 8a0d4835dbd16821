//! Volume resample command.

use crate::ResampleArgs;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;
use tracing::info;
use volvis_io::{fld, SampleKind};
use volvis_volume::parallel;

/// Runs the resample command.
///
/// Interpolated values are rounded and clamped to the output sample type.
pub fn run(args: ResampleArgs, verbose: bool) -> Result<()> {
    let field = super::load_field(&args.input)?;
    let start = Instant::now();

    let values = parallel::resample(&field, args.size, args.mode)?;
    let (kind, ceiling) = if args.byte {
        (SampleKind::Byte, u8::MAX as f32)
    } else {
        (SampleKind::Short, u16::MAX as f32)
    };
    let samples = quantize(&values, ceiling);

    info!(
        from = %field.dims(),
        to = %args.size,
        mode = %args.mode,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Resampled volume"
    );

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create: {}", args.output.display()))?;
    let mut writer = BufWriter::new(file);
    fld::write_to(&mut writer, args.size, &samples, kind)
        .with_context(|| format!("Failed to save: {}", args.output.display()))?;
    writer.flush()?;

    if verbose {
        println!(
            "{} -> {} ({} -> {}, {})",
            args.input.display(),
            args.output.display(),
            field.dims(),
            args.size,
            args.mode
        );
    }

    Ok(())
}

fn quantize(values: &[f32], ceiling: f32) -> Vec<u16> {
    values
        .iter()
        .map(|&v| v.round().clamp(0.0, ceiling) as u16)
        .collect()
}
