//! Dartify - pipeline driver
//!
//! Runs the phases of a transpilation in strict order:
//!
//! 1. Discover and parse every declaration file
//! 2. Build the symbol table over all of them
//! 3. Route and emit every declaration into in-memory output records
//! 4. Write the records and their aggregators
//!
//! A phase only starts once the previous one has finished for every input.
//! A declaration file that cannot be read or parsed is logged and left out;
//! the run only fails when no declaration file is left.

use crate::config::DartifyConfig;
use crate::decl::DeclFile;
use crate::diagnostics::{DartifyError, DartifyResult};
use crate::discover::discover_declaration_files;
use crate::materialize::materialize;
use crate::parser::parse_declaration_file;
use crate::router::{route, OutputLayout, OutputRecords};
use crate::symbols::SymbolTable;
use std::path::{Path, PathBuf};

/// In-memory result of the symbol and routing phases
#[derive(Debug, Clone)]
pub struct Transpiled {
    /// Symbol table built over all inputs
    pub symbols: SymbolTable,
    /// Output records keyed by output path
    pub records: OutputRecords,
}

impl Transpiled {
    /// Number of records that hold generated code
    pub fn record_count(&self) -> usize {
        self.records.values().filter(|r| !r.is_empty()).count()
    }
}

/// Summary of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutput {
    /// Output root
    pub output_dir: PathBuf,
    /// Number of declaration files read
    pub declaration_files: usize,
    /// Number of symbols in the symbol table
    pub symbol_count: usize,
    /// Number of binding files generated
    pub record_count: usize,
    /// Binding files written
    pub files: Vec<PathBuf>,
    /// Aggregator files written
    pub aggregators: Vec<PathBuf>,
    /// Whether writing was skipped
    pub dry_run: bool,
}

impl BuildOutput {
    /// Create an empty build output
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Get all written files
    pub fn all_files(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter().chain(self.aggregators.iter())
    }
}

/// Transpiler from a `.d.ts` tree to Dart bindings
#[derive(Debug, Clone)]
pub struct Dartify {
    config: DartifyConfig,
}

impl Dartify {
    /// Create a transpiler
    pub fn new(config: DartifyConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &DartifyConfig {
        &self.config
    }

    /// Run every phase
    pub fn run(&self) -> DartifyResult<BuildOutput> {
        let (input_dir, output_dir) = self.config.validate()?;

        // Phase 0: discovery and parsing
        let paths = discover_declaration_files(input_dir, &self.config.platform_filter())?;
        let mut files = Vec::with_capacity(paths.len());
        for path in &paths {
            match parse_declaration_file(path) {
                Ok(file) => files.push(file),
                Err(e) => tracing::warn!("Skipping {}: {}", path.display(), e),
            }
        }
        tracing::info!("Parsed {} of {} declaration files", files.len(), paths.len());

        // Phases 1 and 2
        let transpiled = self.transpile(&files)?;

        let mut output = BuildOutput::new(output_dir);
        output.declaration_files = files.len();
        output.symbol_count = transpiled.symbols.len();
        output.record_count = transpiled.record_count();
        output.dry_run = self.config.dry_run;

        // Phase 3
        if self.config.dry_run {
            tracing::info!("Dry run, not writing {} binding files", output.record_count);
            return Ok(output);
        }

        let written = materialize(&transpiled.records, output_dir, self.config.aggregators)?;
        output.files = written.files;
        output.aggregators = written.aggregators;

        Ok(output)
    }

    /// Build the symbol table and route every declaration, in memory
    pub fn transpile(&self, files: &[DeclFile]) -> DartifyResult<Transpiled> {
        let (input_dir, output_dir) = self.config.validate()?;
        if files.is_empty() {
            return Err(DartifyError::NoDeclarationFiles(input_dir.to_path_buf()));
        }

        let symbols = SymbolTable::build(files, &self.config.platform_filter());
        tracing::info!("Resolved {} symbols", symbols.len());

        let layout = OutputLayout::new(input_dir, output_dir);
        let records = route(files, &symbols, &layout);
        tracing::info!("Generated {} output records", records.len());

        Ok(Transpiled { symbols, records })
    }
}

/// Transpile `input_dir` into `output_dir` with default settings
pub fn dartify(input_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> DartifyResult<BuildOutput> {
    Dartify::new(DartifyConfig::new(input_dir.as_ref(), output_dir.as_ref())).run()
}
