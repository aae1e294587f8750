//! handysheet - runs the builder walk-through against an in-memory spreadsheet

use anyhow::Context;
use handysheet::config::{self, Settings};
use handysheet::{demo, render};
use handysheet_core::{MemoryBackend, ValueInputOption};
use std::env;
use std::path::PathBuf;

fn print_usage() {
    eprintln!("Usage: handysheet [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <FILE>       Load settings from a TOML file");
    eprintln!("  --no-config               Ignore the user config file");
    eprintln!("  -s, --sheet <NAME>        Tab to run the demo on (default: Sheet1)");
    eprintln!("  --raw                     Store written values without parsing them");
    eprintln!("  -o, --output <FILE>       Also export the final tab to a markdown file");
    eprintln!("  -h, --help                Print help");
}

fn run(settings: &Settings, output_file: Option<PathBuf>) -> anyhow::Result<()> {
    let backend = MemoryBackend::new();
    let report = demo::run(&backend, settings).context("demo run failed")?;

    for step in &report.steps {
        println!("- {}", step);
    }
    println!("Tabs: {}", report.tabs.join(", "));
    println!();

    {
        let mut stdout = std::io::stdout().lock();
        render::write_markdown(&mut stdout, &settings.sheet, &report.rows)
            .context("failed to write table")?;
    }

    if let Some(output_path) = output_file {
        render::export_markdown(&output_path, &settings.sheet, &report.rows)
            .with_context(|| format!("failed to export to {}", output_path.display()))?;
        println!();
        println!("Exported to {}", output_path.display());
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut config_file: Option<PathBuf> = None;
    let mut use_config = true;
    let mut sheet: Option<String> = None;
    let mut raw = false;
    let mut output_file: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "-c" | "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a file path");
                    std::process::exit(1);
                }
                config_file = Some(PathBuf::from(&args[i]));
            }
            "--no-config" => use_config = false,
            "-s" | "--sheet" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --sheet requires a tab name");
                    std::process::exit(1);
                }
                sheet = Some(args[i].to_string());
            }
            "--raw" => raw = true,
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires a file path");
                    std::process::exit(1);
                }
                output_file = Some(PathBuf::from(&args[i]));
            }
            arg => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let (mut settings, warnings) = if use_config || config_file.is_some() {
        config::load_settings(config_file.as_ref())
    } else {
        (Settings::default(), Vec::new())
    };
    if let Some(sheet) = sheet {
        settings.sheet = sheet;
    }
    if raw {
        settings.value_input_option = ValueInputOption::Raw;
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&settings.log_level))
        .init();
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    if let Err(e) = run(&settings, output_file) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
