//! Terminal summary of a run
//!
//! # Example
//!
//! ```no_run
//! use dartify::{BuildOutput, SummaryPrinter};
//!
//! let output = BuildOutput::new("out");
//! SummaryPrinter::new(&output, true).print_to_stdout();
//! ```

use crate::pipeline::BuildOutput;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Prints the counts of a [`BuildOutput`]
pub struct SummaryPrinter<'a> {
    output: &'a BuildOutput,
    use_color: bool,
}

impl<'a> SummaryPrinter<'a> {
    /// Create a printer
    pub fn new(output: &'a BuildOutput, use_color: bool) -> Self {
        Self { output, use_color }
    }

    /// Print to stdout, colored when stdout is a terminal
    pub fn print_to_stdout(&self) {
        let choice = if self.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        if let Err(e) = self.write_colored(&mut stdout) {
            eprintln!("Error printing summary: {}", e);
        }
    }

    /// Write with colors to a WriteColor implementor
    pub fn write_colored<W: WriteColor>(&self, w: &mut W) -> io::Result<()> {
        for (count, label) in self.counts() {
            self.write_bold(w, &count.to_string())?;
            writeln!(w, " {}", label)?;
        }

        let dir = self.output.output_dir.display().to_string();
        if self.output.dry_run {
            w.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            write!(w, "Dry run:")?;
            w.reset()?;
            writeln!(w, " nothing written to {}", dir)?;
        } else {
            w.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
            write!(w, "Generated")?;
            w.reset()?;
            writeln!(w, " Dart interop files in {}", dir)?;
        }
        Ok(())
    }

    fn counts(&self) -> Vec<(usize, &'static str)> {
        let mut counts = vec![
            (self.output.declaration_files, "declaration files"),
            (self.output.symbol_count, "symbols"),
            (self.output.record_count, "bindings"),
        ];
        if !self.output.dry_run {
            counts.push((self.output.aggregators.len(), "aggregator files"));
        }
        counts
    }

    fn write_bold<W: WriteColor>(&self, w: &mut W, s: &str) -> io::Result<()> {
        w.set_color(ColorSpec::new().set_bold(true))?;
        write!(w, "{}", s)?;
        w.reset()
    }
}

impl Display for SummaryPrinter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (count, label) in self.counts() {
            writeln!(f, "{} {}", count, label)?;
        }
        let dir = self.output.output_dir.display();
        if self.output.dry_run {
            writeln!(f, "Dry run: nothing written to {}", dir)
        } else {
            writeln!(f, "Generated Dart interop files in {}", dir)
        }
    }
}
