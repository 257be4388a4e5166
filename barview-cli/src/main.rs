use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use barview_chart::html::{render_page, PageChart};
use barview_chart::{load_records, ChartConfig, ChartView};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

const DEFAULT_SELECTOR: &str = "#chart";

/// Render bar charts of (state, percent) datasets
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a CSV or JSON dataset to an SVG, HTML or PNG file
    Render {
        /// Dataset with `state` and `percent` fields (.csv or .json)
        data: PathBuf,

        /// Chart configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Container selector used when embedding the chart in HTML
        #[arg(long)]
        selector: Option<String>,

        /// Container width in pixels
        #[arg(long)]
        width: Option<f32>,

        /// Container height in pixels
        #[arg(long)]
        height: Option<f32>,

        /// Output path (defaults to the data file with the format's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
        format: OutputFormat,

        /// Scale factor for PNG output
        #[arg(short, long, default_value_t = 2.0)]
        scale: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Html,
    Png,
}

impl OutputFormat {
    fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Html => "html",
            OutputFormat::Png => "png",
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render {
            data,
            config,
            selector,
            width,
            height,
            output,
            format,
            scale,
        } => {
            let chart_config = build_config(config.as_deref(), selector, width, height)?;
            let output = output.unwrap_or_else(|| data.with_extension(format.extension()));
            render(&data, chart_config, &output, format, scale)
        }
    }
}

/// Loads the config file (or the defaults) and applies the command-line overrides on top
fn build_config(
    path: Option<&Path>,
    selector: Option<String>,
    width: Option<f32>,
    height: Option<f32>,
) -> Result<ChartConfig> {
    let mut config = match path {
        Some(path) => ChartConfig::from_path(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => ChartConfig::new(DEFAULT_SELECTOR),
    };
    if let Some(selector) = selector {
        config.parent_element = selector;
    }
    if let Some(width) = width {
        config = config.with_container_width(width);
    }
    if let Some(height) = height {
        config = config.with_container_height(height);
    }
    Ok(config)
}

fn render(
    data_path: &Path,
    config: ChartConfig,
    output: &Path,
    format: OutputFormat,
    scale: f32,
) -> Result<()> {
    let records = load_records(data_path)
        .with_context(|| format!("loading {}", data_path.display()))?;

    let mut view = ChartView::new(config, vec![]);
    let summary = view.update(records)?;
    info!("rendered {} bars", summary.entered + summary.updated);

    match format {
        OutputFormat::Svg => fs::write(output, view.to_svg()?)?,
        OutputFormat::Html => {
            let title = data_path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "barview".to_string());
            let page = render_page(&title, &[PageChart::from_view(&view)?]);
            fs::write(output, page)?
        }
        OutputFormat::Png => write_png(&view, output, scale)?,
    }

    info!("Saved {} to {}", format.extension(), output.display());
    Ok(())
}

#[cfg(feature = "png")]
fn write_png(view: &ChartView, output: &Path, scale: f32) -> Result<()> {
    fs::write(output, view.to_png(scale)?)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
fn write_png(_view: &ChartView, _output: &Path, _scale: f32) -> Result<()> {
    anyhow::bail!("PNG output requires the png feature")
}

#[cfg(test)]
mod tests {
    use super::*;
    use barview_chart::Margin;
    use std::io::Write;

    fn config_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r##"{{"parentElement": "#from-file", "containerWidth": 800, "containerHeight": 500, "margin": {{"top": 10}}}}"##
        )
        .unwrap();
        file
    }

    #[test]
    fn test_flags_override_config_file() {
        let file = config_file();
        let config = build_config(
            Some(file.path()),
            Some(".from-flag".to_string()),
            Some(640.0),
            Some(480.0),
        )
        .unwrap();

        assert_eq!(config.parent_element, ".from-flag");
        assert_eq!(config.container_width, 640.0);
        assert_eq!(config.container_height, 480.0);
        assert_eq!(config.margin.top, 10.0);
    }

    #[test]
    fn test_config_file_used_without_flags() {
        let file = config_file();
        let config = build_config(Some(file.path()), None, None, None).unwrap();

        assert_eq!(config.parent_element, "#from-file");
        assert_eq!(config.container_width, 800.0);
        assert_eq!(config.container_height, 500.0);
        assert_eq!(
            config.margin,
            Margin {
                top: 10.0,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_defaults_without_config_file() {
        let config = build_config(None, None, Some(320.0), None).unwrap();
        assert_eq!(config, ChartConfig::new("#chart").with_container_width(320.0));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = build_config(Some(missing.as_path()), None, None, None).unwrap_err();
        assert!(err.to_string().starts_with("reading config"));
    }

    #[test]
    fn test_parse_render_flags() {
        let cli = Cli::try_parse_from([
            "barview",
            "render",
            "data.csv",
            "--config",
            "config.json",
            "--selector",
            "#other",
            "--width",
            "640",
            "--format",
            "html",
        ])
        .unwrap();

        let Commands::Render {
            data,
            config,
            selector,
            width,
            height,
            output,
            format,
            scale,
        } = cli.command;
        assert_eq!(data, PathBuf::from("data.csv"));
        assert_eq!(config, Some(PathBuf::from("config.json")));
        assert_eq!(selector.as_deref(), Some("#other"));
        assert_eq!(width, Some(640.0));
        assert_eq!(height, None);
        assert_eq!(output, None);
        assert_eq!(format, OutputFormat::Html);
        assert_eq!(scale, 2.0);
    }
}
