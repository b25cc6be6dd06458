use anyhow::{anyhow, Error as AnyError};
use clap::{Parser, Subcommand, ValueEnum};
use geo::geometry::{Coord, LineString};
use std::{path::PathBuf, str::FromStr};
use viewer::ArrowKey;

/// View terrain profiles and height time series of DHM grids.
#[derive(Parser, Debug)]
pub struct Cli {
    /// Viewer configuration (JSON). Relative source URLs are resolved
    /// against its directory.
    #[arg(short, long)]
    pub config: PathBuf,

    /// Chart container width in pixels.
    #[arg(long, default_value_t = 650.0)]
    pub width: f64,

    /// Chart container height in pixels.
    #[arg(long, default_value_t = 250.0)]
    pub height: f64,

    #[command(subcommand)]
    pub cmd: Command,
}

/// A map coordinate "x,y".
#[derive(Clone, Debug, Copy)]
pub struct XY(pub Coord<f64>);

impl FromStr for XY {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let (x_str, y_str) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("not a valid x,y pair"))?;
        let x = f64::from_str(x_str.trim())?;
        let y = f64::from_str(y_str.trim())?;
        Ok(Self(Coord { x, y }))
    }
}

/// Line vertices "x,y;x,y;...".
#[derive(Clone, Debug)]
pub struct Polyline(pub LineString<f64>);

impl FromStr for Polyline {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let coords = s
            .split(';')
            .map(|vertex| XY::from_str(vertex).map(|XY(coord)| coord))
            .collect::<Result<Vec<_>, AnyError>>()?;
        if coords.len() < 2 {
            return Err(anyhow!("a line needs at least two vertices"));
        }
        Ok(Self(LineString::new(coords)))
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Format {
    Svg,
    Json,
    Ascii,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Nudge {
    Up,
    Down,
    Left,
    Right,
}

impl From<Nudge> for ArrowKey {
    fn from(nudge: Nudge) -> Self {
        match nudge {
            Nudge::Up => Self::Up,
            Nudge::Down => Self::Down,
            Nudge::Left => Self::Left,
            Nudge::Right => Self::Right,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sample a terrain profile along a line.
    Profile {
        /// Line vertices "x,y;x,y;...".
        #[arg(long, conflicts_with = "line_file", required_unless_present = "line_file")]
        line: Option<Polyline>,

        /// GeoJSON file holding the line.
        #[arg(long)]
        line_file: Option<PathBuf>,

        /// Source to sample, by position in the config.
        #[arg(long, default_value_t = 0)]
        select: usize,

        /// Arrow key presses moving the line, e.g. "up,up,left".
        #[arg(long, value_enum, value_delimiter = ',')]
        nudge: Vec<Nudge>,

        /// Chart click "px,py" placing a marker on the line.
        #[arg(long)]
        click: Vec<XY>,

        /// Write placed markers to this GeoJSON file.
        #[arg(long)]
        markers: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = Format::Svg)]
        format: Format,

        /// Output file, stdout when omitted.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Sample every source at one location.
    Series {
        /// Location "x,y".
        #[arg(long)]
        at: XY,

        /// Source shown by the height indicator and timeline.
        #[arg(long, default_value_t = 0)]
        select: usize,

        #[arg(long, value_enum, default_value_t = Format::Svg)]
        format: Format,

        /// Output file, stdout when omitted.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::{Polyline, XY};
    use geo::coord;

    #[test]
    fn test_parse_xy() {
        let XY(coord) = "2600000.5, 1200000".parse().unwrap();
        assert_eq!(coord, coord! { x: 2_600_000.5, y: 1_200_000.0 });
        assert!("2600000".parse::<XY>().is_err());
    }

    #[test]
    fn test_parse_polyline() {
        let Polyline(line) = "0,0;10,0;10,5".parse().unwrap();
        assert_eq!(line.0.len(), 3);
        assert_eq!(line[2], coord! { x: 10.0, y: 5.0 });
        assert!("0,0".parse::<Polyline>().is_err());
        assert!("0,0;x,1".parse::<Polyline>().is_err());
    }
}
