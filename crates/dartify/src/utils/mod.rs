//! Utilities for dartify
//!
//! This module provides utilities for:
//! - SWC/deno_ast TypeScript parsing
//! - Filesystem helpers used while writing bindings

pub mod fs;
pub mod swc;

pub use fs::{ensure_dir_exists, list_dart_files, to_slash, write_file};
pub use swc::{parse_typescript_file, parse_typescript_source, ParsedModule};
