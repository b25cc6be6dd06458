#![allow(clippy::cast_possible_truncation)]

mod options;

use anyhow::{anyhow, Error as AnyError};
use chart::{date_to_x, SvgSurface};
use clap::Parser;
use dhm::{GridLayer, Viewport, DATE_FORMAT};
use options::{Cli, Command as CliCmd, Format, Polyline};
use serde::Serialize;
use std::{fs, path::Path};
use textplots::{Chart, Plot, Shape};
use viewer::{
    line_from_geojson, Activation, Event, VecFeatureStore, ViewerConfig, ViewerController,
    ViewerMode,
};

type Controller = ViewerController<GridLayer, Viewport, SvgSurface>;

fn main() -> Result<(), AnyError> {
    let Cli {
        config: config_path,
        width,
        height,
        cmd,
    } = Cli::parse();

    env_logger::init();

    let mut config = ViewerConfig::open(&config_path)?;
    if let Some(dir) = config_path.parent() {
        config.resolve_urls(dir);
    }

    match cmd {
        CliCmd::Profile {
            line,
            line_file,
            select,
            nudge,
            click,
            markers,
            format,
            out,
        } => {
            let line = match (line, line_file) {
                (Some(Polyline(line)), _) => line,
                (None, Some(path)) => line_from_geojson(&fs::read_to_string(path)?)?,
                (None, None) => return Err(anyhow!("either --line or --line-file is required")),
            };
            config.mode = ViewerMode::Profile;
            let mut controller = open(config, (width, height))?;
            controller.handle(Event::SourceSelected(select))?;
            controller.handle(Event::DrawStart)?;
            controller.handle(Event::DrawEnd(line))?;
            for key in nudge {
                controller.handle(Event::Key(key.into()))?;
            }
            if controller.profile().is_none() {
                return Err(anyhow!(
                    "no profile, is the line shorter than the {} step?",
                    controller.config().step
                ));
            }
            for options::XY(pixel) in click {
                controller.handle(Event::ChartClick {
                    x: pixel.x,
                    y: pixel.y,
                })?;
            }
            if let Some(path) = markers {
                fs::write(path, controller.markers_geojson().to_string())?;
            }
            match format {
                Format::Svg => write_out(out.as_deref(), &controller.surface().render()?)?,
                Format::Json => write_out(out.as_deref(), &profile_json(&controller)?)?,
                Format::Ascii => {
                    plot_ascii(controller.chart().map(|c| c.data()).unwrap_or_default());
                }
            }
        }
        CliCmd::Series {
            at: options::XY(at),
            select,
            format,
            out,
        } => {
            if config.mode == ViewerMode::Profile {
                config.mode = ViewerMode::TimeSeries;
            }
            let mut controller = open(config, (width, height))?;
            controller.handle(Event::SourceSelected(select))?;
            controller.map_mut().pan_to(at);
            let map = *controller.map();
            controller.layer_mut().render(&map);
            controller.handle(Event::ViewChanged)?;

            let indicator = controller
                .height_indicator()
                .ok_or_else(|| anyhow!("no data at {},{}", at.x, at.y))?;
            eprintln!("{}: {indicator} m", controller.selected_source().name);
            match format {
                Format::Svg => match controller.chart() {
                    Some(_) => write_out(out.as_deref(), &controller.surface().render()?)?,
                    None => return Err(anyhow!("mosaic viewers have no chart")),
                },
                Format::Json => write_out(out.as_deref(), &series_json(&controller)?)?,
                Format::Ascii => {
                    let points: Vec<(f64, f64)> = controller
                        .series()
                        .map(|series| {
                            series
                                .entries
                                .iter()
                                .map(|&(date, z)| (date_to_x(date), z))
                                .collect()
                        })
                        .unwrap_or_default();
                    plot_ascii(&points);
                }
            }
        }
    };
    Ok(())
}

/// Loads every source and frames the whole raster at its native
/// resolution, so every cell is loaded.
fn open(config: ViewerConfig, (width, height): (f64, f64)) -> Result<Controller, AnyError> {
    let mut layer = match config.mode.activation() {
        Activation::SwapSource => GridLayer::open(&config.sources)?,
        Activation::SelectBand => GridLayer::stacked(&config.sources)?,
    };
    let view = config.mode.initial_view(&layer, &config.sources)?;
    let grid = layer.active_grid();
    let resolution = grid.cell_size();
    let extent = view.extent.unwrap_or_else(|| grid.extent());
    let map = Viewport::new(
        view.center,
        resolution,
        (extent.width() / resolution, extent.height() / resolution),
    );
    layer.render(&map);
    let mut controller =
        ViewerController::new(config, layer, map, SvgSurface::new(), VecFeatureStore::new())?;
    controller.handle(Event::Resize { width, height })?;
    Ok(controller)
}

fn write_out(out: Option<&Path>, text: &str) -> Result<(), AnyError> {
    match out {
        Some(path) => fs::write(path, text)?,
        None => println!("{text}"),
    }
    Ok(())
}

fn profile_json(controller: &Controller) -> Result<String, AnyError> {
    #[derive(Serialize)]
    struct JsonEntry {
        location: [f64; 2],
        distance: f64,
        elevation: Option<f64>,
    }

    let profile = controller.profile().ok_or_else(|| anyhow!("no profile"))?;
    let entries: Vec<JsonEntry> = profile
        .points
        .iter()
        .zip(profile.distances.iter())
        .zip(profile.elevations.iter())
        .map(|((point, distance), elevation)| JsonEntry {
            location: [point.x, point.y],
            distance: *distance,
            elevation: (!elevation.is_nan()).then_some(*elevation),
        })
        .collect();
    Ok(serde_json::to_string(&entries)?)
}

fn series_json(controller: &Controller) -> Result<String, AnyError> {
    #[derive(Serialize)]
    struct JsonEntry<'a> {
        name: &'a str,
        date: String,
        height: Option<f64>,
    }

    let series = controller.series().ok_or_else(|| anyhow!("no time series"))?;
    let entries: Vec<JsonEntry> = controller
        .config()
        .sources
        .iter()
        .zip(series.entries.iter())
        .map(|(source, &(date, z))| JsonEntry {
            name: &source.name,
            date: date.format(DATE_FORMAT).to_string(),
            height: (!z.is_nan()).then_some(z),
        })
        .collect();
    Ok(serde_json::to_string(&entries)?)
}

fn plot_ascii(points: &[(f64, f64)]) {
    let plot_data: Vec<(f32, f32)> = points
        .iter()
        .filter(|(_, y)| !y.is_nan())
        .map(|&(x, y)| (x as f32, y as f32))
        .collect();
    let (Some(first), Some(last)) = (plot_data.first(), plot_data.last()) else {
        return;
    };
    if plot_data.len() < 2 || first.0 >= last.0 {
        return;
    }
    Chart::new(300, 150, first.0, last.0)
        .lineplot(&Shape::Lines(&plot_data))
        .display();
}
