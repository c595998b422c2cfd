//! Rendering of results and benchmark logs.

use fxhash::FxHashSet;
use std::io::{self, Write};
use crate::bench::Timings;
use crate::graph::UGraph;
use crate::heuristics::Analysis;

/// Language of the headings written by a `Reporter`.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum Language {
    #[default]
    En,
    Ru,
}

impl Language {

    fn independent_set(self) -> &'static str {
        match self {
            Self::En => "Maximum independent set: ",
            Self::Ru => "Наибольшее независимое множество: ",
        }
    }

    fn vertex_cover(self) -> &'static str {
        match self {
            Self::En => "Minimum vertex cover: ",
            Self::Ru => "Наименьшее вершинное покрытие: ",
        }
    }

    fn mean(self, mean: f64) -> String {
        match self {
            Self::En => format!("Average time: {}us", mean),
            Self::Ru => format!("Среднее время: {}мкс", mean),
        }
    }

    fn log_written(self, log: &str) -> String {
        match self {
            Self::En => format!("Success!\nThe timings were written to {}", log),
            Self::Ru => format!("Успех!\nРезультаты работы программы были выведены в {}", log),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct ReportConfig {
    pub language: Language,
    /// Clears the terminal before a new graph is reported.
    pub clear_screen: bool,
}

/// Renders `set` as `{ a, b, c }`, in node order.
pub fn format_set(graph: &UGraph, set: &FxHashSet<usize>) -> String {
    let mut nodes: Vec<usize> = set.iter().copied().collect();
    nodes.sort_unstable();
    let labels: Vec<&str> = nodes.into_iter().map(|node| graph.label(node)).collect();
    format!("{{ {} }}", labels.join(", "))
}

/// Writes results to `out` as configured by a `ReportConfig`.
pub struct Reporter<W: Write> {
    out: W,
    config: ReportConfig,
}

impl<W: Write> Reporter<W> {

    pub fn new(out: W, config: ReportConfig) -> Self {
        Reporter { out, config }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn clear(&mut self) -> io::Result<()> {
        if self.config.clear_screen {
            write!(self.out, "\x1b[2J\x1b[H")?;
        }
        Ok(())
    }

    /// Writes the name of the graph followed by both sets of `analysis`.
    pub fn write_analysis(&mut self, name: &str, graph: &UGraph, analysis: &Analysis)
        -> io::Result<()> {
        self.clear()?;
        writeln!(self.out, "{}", name)?;
        writeln!(self.out, "{}{}", self.config.language.independent_set(),
            format_set(graph, analysis.independent_set.as_set()))?;
        writeln!(self.out, "{}{}", self.config.language.vertex_cover(),
            format_set(graph, &analysis.vertex_cover))?;
        Ok(())
    }

    /// Writes one sample per line, followed by the mean and an empty line.
    pub fn write_timings(&mut self, timings: &Timings) -> io::Result<()> {
        for sample in timings.samples() {
            writeln!(self.out, "{}", sample)?;
        }
        if let Some(mean) = timings.mean() {
            writeln!(self.out, "{}", self.config.language.mean(mean))?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    /// Tells the user where the benchmark log went.
    pub fn write_log_written(&mut self, log: &str) -> io::Result<()> {
        self.clear()?;
        writeln!(self.out, "{}", self.config.language.log_written(log))
    }
}
