//! dartify command line
//!
//! ```text
//! dartify <inputDir> <outputDir> [--config <file>] [--dry-run] [--no-aggregators]
//! ```
//!
//! Log output goes to stderr and is controlled by `DARTIFY_LOG`
//! (e.g. `DARTIFY_LOG=dartify=debug`).

use anyhow::{bail, Context, Result};
use dartify::{Dartify, DartifyConfig, SummaryPrinter};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str =
    "Usage: dartify <inputDir> <outputDir> [--config <file>] [--dry-run] [--no-aggregators]";

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_env("DARTIFY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &[String]) -> Result<()> {
    let cmd = Command::parse(args)?;
    tracing::debug!("Parsed arguments: {:?}", cmd);
    if cmd.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = cmd.into_config()?;
    let (input_dir, output_dir) = match config.validate() {
        Ok((input, output)) => (input.to_path_buf(), output.to_path_buf()),
        Err(e) => {
            eprintln!("{}", USAGE);
            return Err(e.into());
        }
    };

    println!("Scanning input directory: {}", input_dir.display());
    let output = Dartify::new(config)
        .run()
        .with_context(|| format!("Failed to generate bindings into {}", output_dir.display()))?;

    SummaryPrinter::new(&output, true).print_to_stdout();
    Ok(())
}

/// Parsed command line
#[derive(Debug, Default, PartialEq)]
struct Command {
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    config: Option<PathBuf>,
    dry_run: bool,
    no_aggregators: bool,
    help: bool,
}

impl Command {
    fn parse(args: &[String]) -> Result<Self> {
        let mut cmd = Command::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    if i + 1 < args.len() {
                        cmd.config = Some(PathBuf::from(&args[i + 1]));
                        i += 2;
                    } else {
                        bail!("--config requires a path\n{}", USAGE);
                    }
                }
                "--dry-run" => {
                    cmd.dry_run = true;
                    i += 1;
                }
                "--no-aggregators" => {
                    cmd.no_aggregators = true;
                    i += 1;
                }
                "--help" | "-h" => {
                    cmd.help = true;
                    i += 1;
                }
                arg if !arg.starts_with('-') => {
                    if cmd.input_dir.is_none() {
                        cmd.input_dir = Some(PathBuf::from(arg));
                    } else if cmd.output_dir.is_none() {
                        cmd.output_dir = Some(PathBuf::from(arg));
                    } else {
                        bail!("Unexpected argument: {}\n{}", arg, USAGE);
                    }
                    i += 1;
                }
                _ => {
                    bail!("Unknown flag: {}\n{}", args[i], USAGE);
                }
            }
        }

        Ok(cmd)
    }

    /// Merge the arguments over the configuration file, if any
    fn into_config(self) -> Result<DartifyConfig> {
        let mut config = match &self.config {
            Some(path) => DartifyConfig::load(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => DartifyConfig::default(),
        };

        if let Some(input) = self.input_dir {
            config = config.input_dir(input);
        }
        if let Some(output) = self.output_dir {
            config = config.output_dir(output);
        }
        if self.dry_run {
            config = config.dry_run(true);
        }
        if self.no_aggregators {
            config = config.aggregators(false);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_positionals_and_flags() {
        let cmd = Command::parse(&args(&["types", "out", "--dry-run", "--no-aggregators"])).unwrap();
        assert_eq!(cmd.input_dir, Some(PathBuf::from("types")));
        assert_eq!(cmd.output_dir, Some(PathBuf::from("out")));
        assert!(cmd.dry_run);
        assert!(cmd.no_aggregators);

        let config = cmd.into_config().unwrap();
        assert!(config.dry_run);
        assert!(!config.aggregators);
    }

    #[test]
    fn test_parse_rejects_bad_arguments() {
        assert!(Command::parse(&args(&["a", "b", "c"])).is_err());
        assert!(Command::parse(&args(&["a", "--verbose"])).is_err());
        assert!(Command::parse(&args(&["a", "b", "--config"])).is_err());
    }

    #[test]
    fn test_missing_output_dir_fails_validation() {
        let config = Command::parse(&args(&["types"])).unwrap().into_config().unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_arguments_override_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dartify.toml");
        std::fs::write(
            &path,
            "input_dir = \"from-file\"\noutput_dir = \"out-file\"\nexclude = [\"vendor.\"]\n",
        )
        .unwrap();

        let cmd = Command::parse(&args(&["types", "--config", path.to_str().unwrap()])).unwrap();
        let config = cmd.into_config().unwrap();
        let (input, output) = config.validate().unwrap();
        assert_eq!(input, Path::new("types"));
        assert_eq!(output, Path::new("out-file"));
        assert_eq!(config.exclude, vec!["vendor."]);
    }
}
