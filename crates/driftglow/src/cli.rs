use anyhow::{bail, Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "driftglow",
    author,
    version,
    about = "Animated dot-field background preview"
)]
pub struct Cli {
    /// Preview window size (e.g. `1280x800`).
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,
}

pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses `WIDTHxHEIGHT` into a physical size pair.
pub fn parse_surface_size(value: &str) -> Result<(u32, u32)> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow::anyhow!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width = width
        .trim()
        .parse::<u32>()
        .with_context(|| format!("invalid width in '{value}'"))?;
    let height = height
        .trim()
        .parse::<u32>()
        .with_context(|| format!("invalid height in '{value}'"))?;
    if width == 0 || height == 0 {
        bail!("surface dimensions must be non-zero");
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_sizes() {
        assert_eq!(parse_surface_size("1280x800").unwrap(), (1280, 800));
        assert_eq!(parse_surface_size("800X600").unwrap(), (800, 600));
        assert_eq!(parse_surface_size(" 640 x 480 ").unwrap(), (640, 480));
    }

    #[test]
    fn rejects_malformed_sizes() {
        assert!(parse_surface_size("1280").is_err());
        assert!(parse_surface_size("wide x tall").is_err());
        assert!(parse_surface_size("").is_err());
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(parse_surface_size("0x600").is_err());
        assert!(parse_surface_size("800x0").is_err());
    }
}
