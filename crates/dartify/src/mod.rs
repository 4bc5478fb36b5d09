//! dartify: Dart JS-interop bindings from TypeScript declaration files
//!
//! This crate turns a tree of `.d.ts` files into Dart binding files by:
//! - Parsing each declaration file using deno_ast/SWC
//! - Building one symbol table over every file before generating anything
//! - Emitting one binding file per declared class, function and type alias
//! - Merging repeated declarations of a symbol into a single binding
//! - Writing per-folder and root aggregator files that re-export the bindings
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ *.d.ts          │
//! │ (SWC parse)     │
//! └────────┬────────┘
//!          ▼
//!   ┌──────────────┐      ┌──────────────┐
//!   │   DeclFile   │─────▶│ SymbolTable  │
//!   └──────┬───────┘      └──────┬───────┘
//!          └──────────┬──────────┘
//!                     ▼
//!              ┌──────────────┐
//!              │    Router    │  emitters + type mapper
//!              └──────┬───────┘
//!                     ▼
//!              ┌──────────────┐
//!              │ OutputRecord │──▶ .dart files + aggregators
//!              └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use dartify::{Dartify, DartifyConfig};
//!
//! let output = Dartify::new(DartifyConfig::new("types", "lib/interop"))
//!     .run()
//!     .expect("Failed to generate bindings");
//! println!("{} bindings", output.record_count);
//! ```

// Core types
pub mod decl;
pub mod symbols;
pub mod types;

// Parsing and generation
pub mod diagnostics;
pub mod emit;
pub mod parser;
pub mod router;

// Driver
pub mod config;
pub mod discover;
pub mod materialize;
pub mod pipeline;
pub mod printer;
pub mod utils;

// Re-exports for convenience
pub use config::DartifyConfig;
pub use decl::{DeclFile, DeclItem, TypeNode};
pub use diagnostics::{DartifyError, DartifyResult};
pub use discover::discover_declaration_files;
pub use materialize::{create_folder_barrel, create_root_exports, materialize, write_dart_file, Materialized};
pub use parser::{parse_declaration_file, parse_declaration_source};
pub use pipeline::{dartify, BuildOutput, Dartify, Transpiled};
pub use printer::SummaryPrinter;
pub use router::{route, OutputLayout, OutputRecord, OutputRecords};
pub use symbols::{NamespacePath, PlatformFilter, QualifiedName, SymbolTable};
pub use types::map_type;
