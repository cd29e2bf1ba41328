//! # artifact-sweep
//!
//! Walks your home directory looking for dependency caches and build output
//! folders, shows how much space each one takes, and deletes the ones you
//! confirm.
//!
//! ## Usage
//!
//! ```bash
//! # Scan the home directory, asking before every deletion
//! artifact-sweep
//!
//! # Only report what would be reclaimed
//! artifact-sweep --dry-run
//!
//! # Scan a specific tree and also treat `target/` folders as reclaimable
//! artifact-sweep --dir ~/code --target target
//! ```

mod cli;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};
use artifact_sweep::{
    ArtifactRules, Scanner, TargetProcessor, config::FileConfig, output::JsonOutput,
};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;

/// Entry point for the artifact-sweep application.
///
/// Errors from [`inner_main`] are printed to stderr; the exit status stays 0.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("{} {err}", "Error:".red());
    }
}

/// Main application logic that can return errors.
///
/// Resolves configuration, prints the scan root, walks it while handing every
/// matched folder to the [`TargetProcessor`], then prints the summary.
///
/// # Errors
///
/// Returns errors from config subcommands, home directory resolution,
/// incompatible options, or JSON serialization.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    let json_mode = args.json();
    let file_config = load_config(json_mode);

    let execution_options = args.execution_options(&file_config);
    if json_mode && execution_options.confirm.is_interactive() {
        bail!("--json requires --dry-run or --yes");
    }

    let (root, is_home) = resolve_root(&args, &file_config)?;
    let rules = args.rules(&file_config);

    if !json_mode {
        let label = if is_home {
            "Home directory:"
        } else {
            "Scan root:"
        };
        println!("{} {}", label.bold(), root.display());
    }

    let output: Box<dyn Write> = if json_mode {
        Box::new(io::sink())
    } else {
        Box::new(io::stdout())
    };

    let stdin = io::stdin();
    let mut processor = TargetProcessor::new(&rules, execution_options, stdin.lock(), output)
        .with_quiet(json_mode);
    let mut scanner = Scanner::new(args.scan_options(&file_config), &rules).with_quiet(json_mode);

    scanner.scan_directory(&root, &mut processor);

    let summary = processor.into_summary();

    if json_mode {
        let output =
            JsonOutput::from_summary(execution_options.confirm, &root, &summary, scanner.errors());
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if summary.found() == 0 {
        println!("\n{}", "No reclaimable folders found.".green());
    } else {
        summary.print_summary(execution_options.confirm);
    }

    if !scanner.errors().is_empty() {
        println!(
            "  {}",
            format!("Scan errors:   {} (see above)", scanner.errors().len()).yellow()
        );
    }

    println!("\n{}", "Scan complete!".green().bold());
    Ok(())
}

/// Determine the directory to walk and whether it is the home directory.
fn resolve_root(args: &Cli, config: &FileConfig) -> Result<(PathBuf, bool)> {
    if let Some(dir) = args.scan_root(config) {
        return Ok((dir, false));
    }

    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine the home directory"))?;
    Ok((home, true))
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# artifact-sweep configuration
# All values shown are their defaults. Uncomment and change as needed.

# Directory to scan (defaults to the home directory when not set)
# dir = "~"

[scanning]
# Extra folder names to treat as reclaimable, on top of
# node_modules, venv, __pycache__, dist and build
# targets = []

# Folder names that are never descended into
# skip = []

# Maximum directory depth to scan (unlimited when not set)
# max_depth = 10

[execution]
# Report folders without deleting anything
# dry_run = false

# Move folders to the system trash instead of deleting them permanently
# use_trash = false
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }
    fn show_names(val: Option<&[String]>) -> String {
        match val {
            Some(v) if !v.is_empty() => {
                let items: Vec<String> = v.iter().map(|n| format!("\"{n}\"")).collect();
                format!("[{}]", items.join(", "))
            }
            _ => "[]  (default)".to_string(),
        }
    }

    let dir = config.dir.as_ref().map_or_else(
        || "\"~\"  (default)".to_string(),
        |p| format!("\"{}\"", p.display()),
    );
    let max_depth = config
        .scanning
        .max_depth
        .map_or_else(|| "unlimited  (default)".to_string(), |d| d.to_string());
    let builtin = ArtifactRules::default()
        .targets()
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "\
dir           = {dir}

[scanning]
targets       = {targets}  (built in: {builtin})
skip          = {skip}
max_depth     = {max_depth}

[execution]
dry_run       = {dry_run}
use_trash     = {use_trash}",
        targets = show_names(config.scanning.targets.as_deref()),
        skip = show_names(config.scanning.skip.as_deref()),
        dry_run = show_bool(config.execution.dry_run, false),
        use_trash = show_bool(config.execution.use_trash, false),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config(json_mode: bool) -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            }
            FileConfig::default()
        }
    }
}
