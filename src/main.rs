use anyhow::{Context, Result};
use clap::Parser;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use editorconfig_core::config::{DEFAULT_CONFIG_FILE_NAME, EffectiveConfig, ResolveOptions, resolve};
use editorconfig_core::version::LIBRARY_VERSION;

#[derive(Parser)]
#[command(name = "editorconfig")]
#[command(
	author,
	about = "Print the EditorConfig properties that apply to each file",
	disable_version_flag = true
)]
#[command(arg_required_else_help = true)]
struct Cli {
	/// Display version information
	#[arg(short = 'v', long)]
	version: bool,

	/// Specify conf filename other than '.editorconfig'
	#[arg(short = 'f', value_name = "PATH", default_value = DEFAULT_CONFIG_FILE_NAME)]
	config_file_name: String,

	/// Specify version (used by devs to test compatibility)
	#[arg(short = 'b', value_name = "VERSION", default_value = LIBRARY_VERSION)]
	format_version: String,

	/// Stop looking for config files above this directory
	#[arg(long, value_name = "DIR")]
	root: Option<PathBuf>,

	/// Print each file's properties as a JSON object
	#[arg(long)]
	json: bool,

	/// Files to find configuration for. Can be a hyphen (-) if you want
	/// path(s) to be read from stdin.
	#[arg(value_name = "FILEPATH", required_unless_present = "version")]
	files: Vec<String>,
}

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	// Handle --version
	if cli.version {
		println!("EditorConfig Rust Core Version {}", LIBRARY_VERSION);
		return Ok(ExitCode::SUCCESS);
	}

	let targets = if cli.files == ["-"] {
		read_targets_from_stdin()?
	} else {
		cli.files.clone()
	};

	let options = ResolveOptions {
		config_file_name: cli.config_file_name.clone(),
		version: cli.format_version.clone(),
		root: cli.root.clone(),
	};

	let show_headers = targets.len() > 1;
	let mut failed = false;

	// Each file resolves independently; one bad document doesn't stop the rest
	for target in &targets {
		match resolve_target(target, &options) {
			Ok(config) => {
				if show_headers {
					println!("[{}]", target);
				}
				print_config(&config, cli.json)?;
			}
			Err(e) => {
				eprintln!("error: {e:?}");
				failed = true;
			}
		}
	}

	Ok(if failed {
		ExitCode::FAILURE
	} else {
		ExitCode::SUCCESS
	})
}

fn resolve_target(target: &str, options: &ResolveOptions) -> Result<EffectiveConfig> {
	resolve(Path::new(target), options)
		.with_context(|| format!("Failed to resolve configuration for {}", target))
}

fn read_targets_from_stdin() -> Result<Vec<String>> {
	let mut targets = Vec::new();
	for line in std::io::stdin().lock().lines() {
		let line = line.context("Failed to read file paths from stdin")?;
		let line = line.trim();
		if !line.is_empty() {
			targets.push(line.to_string());
		}
	}
	Ok(targets)
}

fn print_config(config: &EffectiveConfig, json: bool) -> Result<()> {
	if json {
		let rendered = serde_json::to_string(config).context("Failed to serialize properties")?;
		println!("{}", rendered);
	} else {
		for (key, value) in config.iter() {
			println!("{}={}", key, value);
		}
	}
	Ok(())
}
