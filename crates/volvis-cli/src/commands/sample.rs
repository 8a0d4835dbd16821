//! Point sampling command.
//!
//! Samples intensity and gradient at voxel-space positions with a
//! [`SampleConfig`] assembled from an optional YAML file and flag overrides.

use crate::SampleArgs;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;
use volvis_volume::{parallel, GradientField, SampleConfig};

/// Runs the sample command.
pub fn run(args: SampleArgs, verbose: bool) -> Result<()> {
    let config = build_config(&args)?;
    debug!(?config, "Sampling configuration");

    let field = super::load_field(&args.input)?;

    if verbose {
        println!(
            "{} ({}, scalar {}, gradient {}, a = {})",
            args.input.display(),
            field.dims(),
            config.scalar,
            config.gradient,
            config.cubic_param
        );
    }

    if args.no_gradient {
        for &c in &args.at {
            println!("{:>8.3} {:>8.3} {:>8.3}  {:.4}", c.x, c.y, c.z, config.sample(&field, c));
        }
        return Ok(());
    }

    let gradients = GradientField::from_scalar(&field);
    let results = parallel::sample_shaded_batch(&field, &gradients, &args.at, &config);
    for (c, (value, g)) in args.at.iter().zip(results) {
        println!(
            "{:>8.3} {:>8.3} {:>8.3}  {:.4}  grad ({:.4}, {:.4}, {:.4}) |{:.4}|",
            c.x, c.y, c.z, value, g.dir.x, g.dir.y, g.dir.z, g.magnitude
        );
    }

    Ok(())
}

/// Config file first, then individual flags on top.
fn build_config(args: &SampleArgs) -> Result<SampleConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SampleConfig::default(),
    };
    if let Some(mode) = args.mode {
        config = config.with_scalar(mode);
    }
    if let Some(mode) = args.gradient_mode {
        config = config.with_gradient(mode);
    }
    if let Some(a) = args.cubic_param {
        config = config.with_cubic_param(a);
    }
    Ok(config)
}

fn load_config(path: &Path) -> Result<SampleConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    parse_config(&text).with_context(|| format!("Invalid config: {}", path.display()))
}

fn parse_config(text: &str) -> Result<SampleConfig> {
    // An empty document deserialises as null; treat it as all defaults.
    if text.trim().is_empty() {
        return Ok(SampleConfig::default());
    }
    Ok(serde_yaml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use volvis_volume::{InterpolationMode, Vec3};

    fn args(config: Option<std::path::PathBuf>) -> SampleArgs {
        SampleArgs {
            input: "unused.fld".into(),
            at: vec![Vec3::ZERO],
            mode: None,
            gradient_mode: None,
            config,
            cubic_param: None,
            no_gradient: false,
        }
    }

    #[test]
    fn test_parse_config() {
        let config = parse_config("scalar: cubic\ngradient: nearest\n").unwrap();
        assert_eq!(config.scalar, InterpolationMode::Cubic);
        assert_eq!(config.gradient, InterpolationMode::NearestNeighbor);
        assert_eq!(parse_config("  \n").unwrap(), SampleConfig::default());
        assert!(parse_config("scalar: lanczos\n").is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.yaml");
        fs::write(&path, "scalar: cubic\ncubic_param: -0.5\n").unwrap();

        let mut args = args(Some(path));
        args.mode = Some(InterpolationMode::NearestNeighbor);
        let config = build_config(&args).unwrap();
        assert_eq!(config.scalar, InterpolationMode::NearestNeighbor);
        assert_eq!(config.cubic_param, -0.5);
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(build_config(&args(Some(dir.path().join("absent.yaml")))).is_err());
    }
}
