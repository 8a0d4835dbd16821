//! Volume info command.
//!
//! Displays dimensions, intensity range and optionally a histogram and the
//! gradient magnitude range.

use crate::InfoArgs;
use anyhow::Result;
use std::fs;
use std::path::Path;
use volvis_volume::{GradientField, ScalarField};

/// Width of the longest histogram bar, in characters.
const BAR_WIDTH: usize = 40;

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    for path in &args.input {
        let file_size = fs::metadata(path)?.len();
        let field = super::load_field(path)?;
        let gradients = args.gradient.then(|| GradientField::from_scalar(&field));
        let histogram = args.histogram.map(|bins| field.statistics().rebin(bins));

        if args.json {
            print_json(path, &field, file_size, gradients.as_ref(), histogram.as_deref());
        } else {
            print_text(path, &field, file_size, gradients.as_ref(), histogram.as_deref(), verbose);
        }

        if args.input.len() > 1 {
            println!();
        }
    }

    Ok(())
}

fn print_text(
    path: &Path,
    field: &ScalarField,
    file_size: u64,
    gradients: Option<&GradientField>,
    histogram: Option<&[usize]>,
    verbose: bool,
) {
    let dims = field.dims();
    println!("{}", path.display());
    println!("  Dimensions: {}", dims);
    println!("  Voxels:     {}", dims.len());
    println!(
        "  File size:  {} ({:.2} B/voxel)",
        super::format_bytes(file_size),
        file_size as f64 / dims.len() as f64
    );
    println!("  Range:      {} .. {}", field.minimum(), field.maximum());

    if verbose {
        let occupied = field.histogram().iter().filter(|&&count| count > 0).count();
        println!("  Distinct:   {}", occupied);
        println!("  Mode:       {}", field.interpolation());
        println!("  Cubic a:    {}", field.cubic_kernel().a());
    }

    if let Some(gradients) = gradients {
        println!(
            "  Gradient:   {:.4} .. {:.4}",
            gradients.min_magnitude(),
            gradients.max_magnitude()
        );
    }

    if let Some(bins) = histogram {
        let values = field.histogram().len();
        let peak = bins.iter().copied().max().unwrap_or(0).max(1);
        println!("  Histogram ({} bins):", bins.len());
        for (idx, &count) in bins.iter().enumerate() {
            let start = (idx * values).div_ceil(bins.len());
            let bar = "#".repeat(count * BAR_WIDTH / peak);
            println!("    {:>6} {:>10} {}", start, count, bar);
        }
    }
}

fn print_json(
    path: &Path,
    field: &ScalarField,
    file_size: u64,
    gradients: Option<&GradientField>,
    histogram: Option<&[usize]>,
) {
    let dims = field.dims();
    println!("{{");
    println!("  \"file\": \"{}\",", super::json_escape(&path.display().to_string()));
    println!("  \"dims\": [{}, {}, {}],", dims.x, dims.y, dims.z);
    println!("  \"voxels\": {},", dims.len());
    println!("  \"size_bytes\": {},", file_size);
    if let Some(gradients) = gradients {
        println!(
            "  \"gradient\": {{\"min_magnitude\": {}, \"max_magnitude\": {}}},",
            gradients.min_magnitude(),
            gradients.max_magnitude()
        );
    }
    if let Some(bins) = histogram {
        let counts: Vec<String> = bins.iter().map(|c| c.to_string()).collect();
        println!("  \"histogram\": [{}],", counts.join(", "));
    }
    println!("  \"min\": {},", field.minimum());
    println!("  \"max\": {}", field.maximum());
    println!("}}");
}
