use anyhow::Context;
use clap::{Parser, ValueEnum};
use molsim_chem::{placeholder_svg, SvgRenderer};
use molsim_core::{Depiction, ImageSize, Metric, RenderError, SearchConfig};
use molsim_similarity::{render_results, SimilaritySearch};
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Find the most similar pairs in a set of chemical structures
#[derive(Parser, Debug)]
#[command(name = "molsim")]
#[command(about = "Pairwise molecular similarity search", long_about = None)]
struct Args {
    /// CSV file with identifier and SMILES columns
    input: PathBuf,

    /// JSON search configuration; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Similarity metric: tanimoto or dice
    #[arg(short, long)]
    metric: Option<Metric>,

    /// Number of pairs to report
    #[arg(short = 'n', long)]
    top_n: Option<usize>,

    /// Morgan fingerprint radius
    #[arg(long)]
    radius: Option<u32>,

    /// Fingerprint length in bits
    #[arg(long)]
    bits: Option<usize>,

    /// Identifier column name
    #[arg(long)]
    id_column: Option<String>,

    /// SMILES column name
    #[arg(long)]
    structure_column: Option<String>,

    /// Score pairs on all cores
    #[arg(long)]
    parallel: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write SVG depictions of the top pairs into this directory
    #[arg(long)]
    depict_dir: Option<PathBuf>,

    /// Depiction width and height in pixels
    #[arg(long, default_value_t = 500)]
    depict_size: u32,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn search_config(&self) -> anyhow::Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::from_path(path)
                .with_context(|| format!("cannot read config {:?}", path))?,
            None => SearchConfig::default(),
        };
        if let Some(metric) = self.metric {
            config.similarity_metric = metric;
        }
        if let Some(top_n) = self.top_n {
            config.top_n = top_n;
        }
        if let Some(radius) = self.radius {
            config.fingerprint_radius = radius;
        }
        if let Some(bits) = self.bits {
            config.fingerprint_bits = bits;
        }
        if let Some(col) = &self.id_column {
            config.id_column = col.clone();
        }
        if let Some(col) = &self.structure_column {
            config.structure_column = col.clone();
        }
        config.parallel |= self.parallel;
        Ok(config)
    }
}

fn file_stem(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

fn write_depiction(
    dir: &Path,
    name: &str,
    result: &Result<Depiction, RenderError>,
    size: ImageSize,
) -> anyhow::Result<()> {
    let depiction = match result {
        Ok(d) => d.clone(),
        Err(e) => placeholder_svg(size, &e.to_string()),
    };
    let path = dir.join(format!("{}.{}", name, depiction.format.extension()));
    std::fs::write(&path, depiction.data).with_context(|| format!("cannot write {:?}", path))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting molsim v{}", env!("CARGO_PKG_VERSION"));
    info!("Input: {:?}", args.input);

    let config = args.search_config()?;
    info!(
        "Metric: {}, radius: {}, bits: {}, top_n: {}",
        config.similarity_metric, config.fingerprint_radius, config.fingerprint_bits, config.top_n
    );

    let search = SimilaritySearch::new(config).context("invalid configuration")?;
    let report = search
        .run_path(&args.input)
        .with_context(|| format!("similarity search over {:?} failed", args.input))?;

    match args.format {
        OutputFormat::Table => print!("{}", report.to_table()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    if let Some(dir) = &args.depict_dir {
        std::fs::create_dir_all(dir).with_context(|| format!("cannot create {:?}", dir))?;
        let size = ImageSize::square(args.depict_size);
        let rendered = render_results(&SvgRenderer::new(), &report.results, size);
        for (pair, images) in report.results.iter().zip(&rendered) {
            let prefix = format!("{:02}", images.rank);
            write_depiction(dir, &format!("{}_1_{}", prefix, file_stem(&pair.ids.0)), &images.first, size)?;
            write_depiction(dir, &format!("{}_2_{}", prefix, file_stem(&pair.ids.1)), &images.second, size)?;
        }
        let failures = rendered
            .iter()
            .flat_map(|r| [&r.first, &r.second])
            .filter(|r| r.is_err())
            .count();
        if failures > 0 {
            warn!("{} depictions replaced with placeholders", failures);
        }
        info!("Depictions written to {:?}", dir);
    }

    Ok(())
}
