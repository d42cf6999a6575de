//! Line protocol for front ends that embed the engine as a child process.
//!
//! One command per stdin line, one JSON object per stdout line:
//!
//! ```text
//! CHECK <word>      -> {"word":..,"suggestions":[..],"is_known":..,"autocorrection":..}
//! SUGGEST <prefix>  -> {"suggestions":[..]}
//! RELOAD <path>     -> {"ok":..,"count":..}
//! ANALYZE <text>    -> {"result":..} or {"error":..}
//! EXIT
//! ```
use drcorrect_core::analysis::AnalysisService;
use drcorrect_core::config::Settings;
use drcorrect_core::{word_at_boundary, TextProcessor};
use log::{debug, info, warn};
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

fn main() -> io::Result<()> {
    // stdout carries the protocol, so logs go to stderr only.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(config.as_deref());

    let processor = TextProcessor::with_options(settings.max_edit_distance, settings.suggestion_limit);
    let report = processor.load_file(&settings.vocabulary_path);
    if !report.ok {
        warn!(
            "Could not load '{}'; starting with an empty vocabulary.",
            settings.vocabulary_path.display()
        );
    }
    let service = match AnalysisService::from_settings(&settings) {
        Ok(service) => Some(service),
        Err(e) => {
            warn!("AI assistant disabled: {}", e);
            None
        }
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let input = line?;
        debug!("<- {:?}", input);
        let (command, argument) = match input.split_once(' ') {
            Some((command, argument)) => (command, argument.trim()),
            None => (input.trim(), ""),
        };

        let response = match command {
            "CHECK" => handle_check(&processor, argument),
            "SUGGEST" => json!({ "suggestions": processor.suggest(argument) }),
            "RELOAD" => json!(processor.load_file(Path::new(argument))),
            "ANALYZE" => handle_analyze(service.as_ref(), argument),
            "EXIT" => break,
            "" => continue,
            other => json!({ "error": format!("unknown command '{}'", other) }),
        };
        writeln!(stdout, "{}", response)?;
        stdout.flush()?;
    }
    info!("Shutting down.");
    Ok(())
}

fn handle_check(processor: &TextProcessor, argument: &str) -> Value {
    match word_at_boundary(argument) {
        Some(word) => json!(processor.check(word)),
        None => json!({ "error": "No word provided." }),
    }
}

fn handle_analyze(service: Option<&AnalysisService>, text: &str) -> Value {
    let Some(service) = service else {
        return json!({ "error": "AI Assistant is not available." });
    };
    match service.analyze(text) {
        Ok(result) => json!({ "result": result }),
        Err(e) => json!({ "error": e.to_string() }),
    }
}
