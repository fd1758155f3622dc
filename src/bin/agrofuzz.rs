//! agrofuzz command line diagnosis.
//!
//! Reads a JSON object of readings (file argument or stdin), runs inference
//! and prints the diagnosis as pretty JSON on stdout. Logs go to stderr and
//! are filtered with `RUST_LOG`.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::EnvFilter;

use agrofuzz::{plant, EngineConfig, InferenceEngine, InputRange, KnowledgeBase, Readings};

/// CLI configuration
#[derive(Default)]
struct Config {
    /// Readings file; stdin when absent or "-"
    input: Option<PathBuf>,
    /// Knowledge base JSON; built-in chilli knowledge base when absent
    knowledge: Option<PathBuf>,
    /// Engine configuration JSON
    engine_config: Option<PathBuf>,
    unbounded: bool,
    dump_knowledge: bool,
}

fn print_help() {
    println!("agrofuzz - fuzzy plant disease diagnosis");
    println!();
    println!("USAGE:");
    println!("    agrofuzz [OPTIONS] [READINGS_JSON]");
    println!();
    println!("ARGS:");
    println!("    <READINGS_JSON>           File with a JSON object of readings [default: stdin]");
    println!();
    println!("OPTIONS:");
    println!("    -k, --knowledge <FILE>    Knowledge base JSON [default: built-in]");
    println!("    -c, --config <FILE>       Engine configuration JSON");
    println!("        --unbounded           Do not clip readings to their universe");
    println!("        --dump-knowledge      Print the knowledge base JSON and exit");
    println!("    -h, --help                Print help information");
}

fn parse_args() -> Result<Config, String> {
    let args: Vec<String> = std::env::args().collect();
    let mut config = Config::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--knowledge" | "-k" => {
                let value = args.get(i + 1).ok_or("--knowledge requires a value")?;
                config.knowledge = Some(PathBuf::from(value));
                i += 2;
            }
            "--config" | "-c" => {
                let value = args.get(i + 1).ok_or("--config requires a value")?;
                config.engine_config = Some(PathBuf::from(value));
                i += 2;
            }
            "--unbounded" => {
                config.unbounded = true;
                i += 1;
            }
            "--dump-knowledge" => {
                config.dump_knowledge = true;
                i += 1;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "-" => {
                config.input = None;
                i += 1;
            }
            arg if arg.starts_with('-') => return Err(format!("unknown argument: {arg}")),
            path => {
                if config.input.is_some() {
                    return Err(format!("unexpected extra argument: {path}"));
                }
                config.input = Some(PathBuf::from(path));
                i += 1;
            }
        }
    }

    Ok(config)
}

fn read_text(path: Option<&PathBuf>) -> Result<String, String> {
    match path {
        Some(p) => fs::read_to_string(p).map_err(|e| format!("read {}: {e}", p.display())),
        None => {
            let mut s = String::new();
            std::io::stdin()
                .read_to_string(&mut s)
                .map_err(|e| format!("read stdin: {e}"))?;
            Ok(s)
        }
    }
}

fn run(config: &Config) -> Result<(), String> {
    let kb = match &config.knowledge {
        Some(path) => KnowledgeBase::from_json(&read_text(Some(path))?).map_err(|e| e.to_string())?,
        None => plant::knowledge_base().map_err(|e| e.to_string())?,
    };
    info!(fingerprint = kb.fingerprint(), rules = kb.rules().len(), "knowledge base loaded");

    if config.dump_knowledge {
        println!("{}", kb.to_json_pretty().map_err(|e| e.to_string())?);
        return Ok(());
    }

    let mut engine_config = match &config.engine_config {
        Some(path) => EngineConfig::from_json(&read_text(Some(path))?).map_err(|e| e.to_string())?,
        None => EngineConfig::default(),
    };
    if config.unbounded {
        engine_config.input_range = InputRange::Unbounded;
    }

    let readings: Readings = serde_json::from_str(&read_text(config.input.as_ref())?)
        .map_err(|e| format!("parse readings: {e}"))?;

    let engine = InferenceEngine::with_config(kb, engine_config);
    let diagnosis = engine.infer(&readings).map_err(|e| e.to_string())?;
    if let Some(top) = diagnosis.primary() {
        info!(output = %top.output, score = top.score, risk = %top.risk, "primary diagnosis");
    }
    println!("{}", diagnosis.to_json_pretty().map_err(|e| e.to_string())?);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
