//! Binary that loads graphs in edge list format from an input directory and either prints an
//! independent set and a vertex cover, or writes timings of repeated runs to a log file.

use std::error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use indie_cover::{
    bench::BenchmarkHarness,
    config::RunConfig,
    graph::EdgePolicy,
    heuristics::CoverStrategy,
    report::{Language, ReportConfig, Reporter},
    vc_instance::VCInstance,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// directory the graph files are read from
    #[arg(long, default_value = "input")]
    input_dir: PathBuf,

    /// how the vertex cover is derived
    #[arg(long, value_enum, default_value_t = Strategy::Complement)]
    strategy: Strategy,

    /// treatment of self-loops and parallel edges
    #[arg(long, value_enum, default_value_t = Policy::Keep)]
    edge_policy: Policy,

    /// language of the printed headings
    #[arg(long, value_enum, default_value_t = Lang::En)]
    language: Lang,

    /// clear the terminal before printing
    #[arg(long)]
    clear_screen: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print an independent set and a vertex cover of each graph
    Solve {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// also write the vertex cover of the last graph, one label per line, to this file
        #[arg(long)]
        cover_out: Option<PathBuf>,
    },
    /// Time the heuristics on each graph and write the samples to a log file
    Bench {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(short, long, default_value_t = BenchmarkHarness::DEFAULT_ITERATIONS)]
        iterations: usize,

        #[arg(long, default_value = "log.txt")]
        log: PathBuf,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Strategy {
    Complement,
    EdgeElimination,
}

impl From<Strategy> for CoverStrategy {
    fn from(strategy: Strategy) -> CoverStrategy {
        match strategy {
            Strategy::Complement => CoverStrategy::Complement,
            Strategy::EdgeElimination => CoverStrategy::EdgeElimination,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Policy {
    Keep,
    Simplify,
}

impl From<Policy> for EdgePolicy {
    fn from(policy: Policy) -> EdgePolicy {
        match policy {
            Policy::Keep => EdgePolicy::Keep,
            Policy::Simplify => EdgePolicy::Simplify,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Lang {
    En,
    Ru,
}

impl From<Lang> for Language {
    fn from(lang: Lang) -> Language {
        match lang {
            Lang::En => Language::En,
            Lang::Ru => Language::Ru,
        }
    }
}

impl Args {
    fn run_config(&self) -> RunConfig {
        let iterations = match self.command {
            Command::Bench { iterations, .. } => iterations,
            Command::Solve { .. } => RunConfig::default().iterations,
        };
        RunConfig {
            input_dir: self.input_dir.clone(),
            strategy: self.strategy.into(),
            edge_policy: self.edge_policy.into(),
            iterations,
            report: ReportConfig {
                language: self.language.into(),
                clear_screen: self.clear_screen,
            },
        }
    }
}

fn solve(config: &RunConfig, files: &[PathBuf], cover_out: Option<&Path>)
    -> Result<(), Box<dyn error::Error>> {
    let stdout = io::stdout();
    let mut reporter = Reporter::new(stdout.lock(), config.report);
    let mut last = None;
    for file in files {
        let graph = config.load(file)?;
        let analysis = graph.analyze(config.strategy)?;
        graph.check_analysis(&analysis, config.strategy)?;
        reporter.write_analysis(&file.display().to_string(), &graph, &analysis)?;
        last = Some((graph, analysis));
    }
    if let (Some(path), Some((graph, analysis))) = (cover_out, last) {
        let mut out = BufWriter::new(File::create(path)?);
        VCInstance::write_solution(&graph, &analysis.vertex_cover, &mut out)?;
        out.flush()?;
    }
    Ok(())
}

fn bench(config: &RunConfig, files: &[PathBuf], log: &Path)
    -> Result<(), Box<dyn error::Error>> {
    let harness = config.harness()?;
    let mut log_writer = Reporter::new(BufWriter::new(File::create(log)?), config.report);
    for file in files {
        let graph = config.load(file)?;
        info!("benchmarking {}", file.display());
        let timings = harness.run(&graph)?;
        log_writer.write_timings(&timings)?;
    }
    log_writer.into_inner().flush()?;
    let stdout = io::stdout();
    Reporter::new(stdout.lock(), config.report).write_log_written(&log.display().to_string())?;
    Ok(())
}

pub fn main() -> Result<(), Box<dyn error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let config = args.run_config();
    match &args.command {
        Command::Solve { files, cover_out } => solve(&config, files, cover_out.as_deref()),
        Command::Bench { files, log, .. } => bench(&config, files, log),
    }
}
