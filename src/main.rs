//! cartoee - palettes, colorbars and thumbnail queries from the command line.

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use cartoee::config::{Cli, ColorbarArgs, Command, QueryArgs, VisArgs};
use cartoee::vis::split_palette;
use cartoee::{
    available_scales, build_legend_with, build_palette, init_tracing, log_timed_operation,
    Colorbar, ColorbarLocation, Config, LegendOptions, ThumbnailRequest, VisParams,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli).context("Failed to load configuration")?;
    init_tracing(&config.log_level);

    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    match &cli.command {
        Command::Palette { scale, hash } => {
            let scale = scale.as_deref().unwrap_or(&config.palette.default_scale);
            let palette = build_palette(scale, config.palette.sample_count)?;
            if *hash {
                println!("{}", palette.colors().join(","));
            } else {
                println!("{}", palette.query_value());
            }
        }
        Command::Scales => {
            for name in available_scales() {
                println!("{}", name);
            }
        }
        Command::Colorbar(args) => render_colorbar(args, &config)?,
        Command::Query(args) => print_query(args, &config)?,
    }

    Ok(())
}

fn vis_params(args: &VisArgs) -> VisParams {
    VisParams {
        min: args.min,
        max: args.max,
        opacity: args.opacity,
        palette: args.palette.as_deref().map(split_palette),
        bands: args.bands.clone(),
    }
}

/// Named scale for the legend: the explicit one, else the configured default
/// when no palette was given
fn legend_scale<'a>(args: &'a VisArgs, config: &'a Config) -> Option<&'a str> {
    match (&args.palette, &args.scale) {
        (_, Some(scale)) => Some(scale.as_str()),
        (Some(_), None) => None,
        (None, None) => Some(config.palette.default_scale.as_str()),
    }
}

fn render_colorbar(args: &ColorbarArgs, config: &Config) -> anyhow::Result<()> {
    let location = match &args.location {
        Some(location) => location.parse::<ColorbarLocation>()?,
        None => config.colorbar.location,
    };

    let params = vis_params(&args.vis);
    let options = LegendOptions {
        sample_count: config.palette.sample_count,
    };
    let legend = build_legend_with(
        &params,
        legend_scale(&args.vis, config),
        args.discrete,
        options,
    )?;

    let colorbar = Colorbar::new(legend, location);
    let (width, height) = config.colorbar.size_for(colorbar.orientation);

    let bytes = log_timed_operation("render_colorbar", || colorbar.encode_png(width, height))?;
    std::fs::write(&args.output, bytes)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!(
        output = %args.output.display(),
        width = width,
        height = height,
        location = location.as_str(),
        "Colorbar written"
    );
    Ok(())
}

fn print_query(args: &QueryArgs, config: &Config) -> anyhow::Result<()> {
    let mut request = ThumbnailRequest::new(vis_params(&args.vis));
    request.sample_count = Some(config.palette.sample_count);
    if let Some(region) = &args.region {
        request = request.with_region(region.parse()?);
    }
    if let Some(dimensions) = &args.dimensions {
        request = request.with_dimensions(dimensions.parse()?);
    }

    // Pairs rather than an object, the service reads them in order
    let params = request.query_params(args.vis.scale.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}
