use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use drcorrect_core::analysis::AnalysisService;
use drcorrect_core::config::Settings;
use drcorrect_core::corpus::CorpusBuilder;
use drcorrect_core::{persistence, word_at_boundary, Correction, LoadReport, TextProcessor};
use log::error;
use std::io::{stdin, stdout, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

const ANALYZE_TICK: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "drcorrect", about = "Clinical notes assistant: suggestions and spell correction")]
struct Cli {
    /// TOML settings file
    #[arg(short, long, env = "DRCORRECT_CONFIG")]
    config: Option<PathBuf>,

    /// Vocabulary word list or compiled `.bin` snapshot; overrides the config
    #[arg(short, long)]
    vocab: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Complete a prefix from the vocabulary
    Suggest {
        prefix: String,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Classify words as clean, auto-correctable or misspelled
    Check {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Extract a vocabulary from free-text files
    BuildVocab {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        #[arg(short, long, default_value = "medical_vocabulary.txt")]
        output: PathBuf,
    },
    /// Compile a word list into a binary snapshot
    Compile {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Ask the AI assistant to explain a term or phrase
    Analyze { text: String },
    /// Interactive note editor with auto-correction
    Edit,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut settings = Settings::load_or_default(cli.config.as_deref());
    if let Some(vocab) = cli.vocab {
        settings.vocabulary_path = vocab;
    }

    match run(cli.command, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, settings: &Settings) -> Result<(), drcorrect_core::Error> {
    match command {
        Command::Suggest { prefix, limit } => {
            let processor = open_processor(settings)?;
            let limit = limit.unwrap_or(settings.suggestion_limit);
            for term in processor.suggest_with_limit(&prefix, limit) {
                println!("{}", term);
            }
        }
        Command::Check { words } => {
            let processor = open_processor(settings)?;
            for word in &words {
                println!("{}", render_outcome(word, &processor.classify(word)));
            }
        }
        Command::BuildVocab { inputs, output } => {
            let mut corpus = CorpusBuilder::new();
            for input in &inputs {
                corpus.add_file(input);
            }
            if corpus.write_to(&output)? {
                println!("{} terms written to '{}'", corpus.len(), output.display());
            }
        }
        Command::Compile { input, output } => {
            let processor = TextProcessor::with_options(settings.max_edit_distance, settings.suggestion_limit);
            let report = processor.load_file(&input);
            if !report.ok {
                return Err(load_error(&input));
            }
            persistence::save_to_disk(&processor.snapshot(), &output)?;
            println!("{} terms compiled to '{}'", report.count, output.display());
        }
        Command::Analyze { text } => {
            let service = AnalysisService::from_settings(settings)?;
            println!("{}", service.analyze(&text)?);
        }
        Command::Edit => {
            let processor = open_processor(settings)?;
            let service = AnalysisService::from_settings(settings)?;
            edit_loop(&processor, &service, settings)?;
        }
    }
    Ok(())
}

/// Loads the configured vocabulary. A `.bin` path is read as a compiled snapshot.
fn open_processor(settings: &Settings) -> Result<TextProcessor, drcorrect_core::Error> {
    let processor = TextProcessor::with_options(settings.max_edit_distance, settings.suggestion_limit);
    let path = &settings.vocabulary_path;
    let report = if path.extension().is_some_and(|ext| ext == "bin") {
        processor.load_store(persistence::load_from_disk(path)?)
    } else {
        processor.load_file(path)
    };
    match report {
        LoadReport { ok: true, .. } => Ok(processor),
        _ => Err(load_error(path)),
    }
}

fn load_error(path: &Path) -> drcorrect_core::Error {
    drcorrect_core::Error::Io(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!(
            "could not load '{}'; run `drcorrect build-vocab` first",
            path.display()
        ),
    ))
}

fn render_outcome(word: &str, outcome: &Correction) -> String {
    match outcome {
        Correction::Clean => format!("{}", word.green()),
        Correction::UnambiguousCorrection { term } => {
            format!("{} -> {}", word.dark_yellow(), term.as_str().green())
        }
        Correction::Flagged { candidates } if candidates.is_empty() => {
            format!("{} (unknown)", word.red().underlined())
        }
        Correction::Flagged { candidates } => {
            format!("{} ? {}", word.red().underlined(), candidates.join(", "))
        }
    }
}

/// Line-based stand-in for the editor: every submitted line ends at a word
/// boundary, so each of its words is checked and auto-corrected.
fn edit_loop(
    processor: &TextProcessor,
    service: &AnalysisService,
    settings: &Settings,
) -> Result<(), drcorrect_core::Error> {
    let mut note = String::new();

    println!("DrCorrect.AI - {} terms loaded", processor.snapshot().len());
    println!("---------------------------------------------------------------");
    println!("Type text and press [Enter]. '?prefix' lists suggestions,");
    println!("':analyze <text>' asks the AI assistant, 'exit' quits.\n");

    loop {
        print!("> ");
        stdout().flush()?;
        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim_end_matches(['\r', '\n']);

        match line.trim() {
            "exit" => break,
            "" => continue,
            cmd if cmd.starts_with('?') => {
                let prefix = cmd[1..].trim();
                if prefix.chars().count() < settings.min_suggest_len {
                    println!("(type at least {} characters)", settings.min_suggest_len);
                    continue;
                }
                let suggestions = processor.suggest(prefix);
                if suggestions.is_empty() {
                    println!("No suggestions found.");
                }
                for (i, s) in suggestions.iter().enumerate() {
                    println!("  {}: {}", i + 1, s);
                }
            }
            cmd if cmd.starts_with(":analyze") => {
                let text = cmd[":analyze".len()..].trim();
                print!("Analyzing");
                stdout().flush()?;
                let outcome = service.analyze_with_progress(text, ANALYZE_TICK, || {
                    print!(".");
                    let _ = stdout().flush();
                });
                println!();
                match outcome {
                    Ok(result) => println!("{}", result.as_str().cyan()),
                    Err(e) => println!("{}", e.to_string().red()),
                }
            }
            _ => {
                let rendered = correct_line(processor, line, &mut note);
                println!("{}", rendered);
            }
        }
    }

    if !note.is_empty() {
        println!("\nFinal note:\n{}", note.trim_end());
    }
    Ok(())
}

/// Appends `line` to `note` with auto-corrections applied and returns a
/// colored rendering of it.
fn correct_line(processor: &TextProcessor, line: &str, note: &mut String) -> String {
    let mut rendered = Vec::new();
    for token in line.split_whitespace() {
        let Some(word) = word_at_boundary(token) else {
            note.push_str(token);
            note.push(' ');
            rendered.push(token.to_string());
            continue;
        };
        let tail = &token[word.len()..];
        match processor.classify(word) {
            Correction::Clean => {
                note.push_str(token);
                rendered.push(token.to_string());
            }
            Correction::UnambiguousCorrection { term } => {
                note.push_str(&term);
                note.push_str(tail);
                rendered.push(format!("{}{}", term.as_str().green(), tail));
            }
            Correction::Flagged { .. } => {
                note.push_str(token);
                rendered.push(format!("{}{}", word.red().underlined(), tail));
            }
        }
        note.push(' ');
    }
    rendered.join(" ")
}
