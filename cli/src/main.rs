//! cvparse CLI - resume extraction tool

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cvparse::render::{self, sections_outline, validation_report};
use cvparse::{Dictionaries, Failure, JsonFormat, ParseOptions, ParsedResume, ResumeParser};

#[derive(Parser)]
#[command(name = "cvparse")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract structured candidate profiles from PDF and DOCX resumes", long_about = None)]
struct Cli {
    /// Input resume (shortcut for `cvparse parse FILE`)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by every command that parses a document.
#[derive(clap::Args, Clone, Default)]
struct ParseArgs {
    /// JSON file overriding the built-in keyword dictionaries
    #[arg(long, value_name = "JSON", env = "CVPARSE_DICTIONARIES")]
    dictionaries: Option<PathBuf>,

    /// Skip pages that fail to decode instead of failing the document
    #[arg(long)]
    lenient: bool,

    /// Only decode the first N pages
    #[arg(long, value_name = "N", default_value = "0")]
    max_pages: u32,

    /// Disable table detection
    #[arg(long)]
    no_tables: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the profile and validation result as JSON
    Parse {
        /// Input resume
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Print the reconstructed text in reading order
    Text {
        /// Input resume
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// List detected sections
    Sections {
        /// Input resume
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Show the confidence score and warnings
    Validate {
        /// Input resume
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Parse several resumes one after another
    Batch {
        /// Input resumes
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Pause between documents, for rate-limited downstream services
        #[arg(long, value_name = "MS", default_value = "0")]
        delay_ms: u64,

        /// Directory for one JSON file per input
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Show version information
    Version,
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Parse {
            input,
            output,
            compact,
            parse,
        }) => cmd_parse(&input, output.as_deref(), compact, &parse),
        Some(Commands::Text {
            input,
            output,
            parse,
        }) => cmd_text(&input, output.as_deref(), &parse),
        Some(Commands::Sections { input, parse }) => cmd_sections(&input, &parse),
        Some(Commands::Validate { input, parse }) => cmd_validate(&input, &parse),
        Some(Commands::Batch {
            inputs,
            delay_ms,
            output,
            parse,
        }) => cmd_batch(&inputs, delay_ms, output.as_deref(), &parse),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if let Some(input) = cli.input {
                cmd_parse(&input, None, false, &ParseArgs::default())
            } else {
                println!("{}", "Usage: cvparse <FILE>".yellow());
                println!("       cvparse --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

impl ParseArgs {
    fn parser(&self) -> Result<ResumeParser, cvparse::Error> {
        let mut options = ParseOptions::new()
            .with_max_pages(self.max_pages)
            .with_tables(!self.no_tables)
            .sequential();
        if self.lenient {
            options = options.lenient();
        }
        let parser = match &self.dictionaries {
            Some(path) => ResumeParser::with_dictionaries(&Dictionaries::from_json_file(path)?)?,
            None => ResumeParser::new(),
        };
        Ok(parser.with_options(options))
    }

    fn parse(&self, input: &Path) -> Result<ParsedResume, cvparse::Error> {
        self.parser()?.parse_path(input)
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_parse(input: &Path, output: Option<&Path>, compact: bool, args: &ParseArgs) -> CliResult {
    let parsed = args.parse(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = render::to_json(&parsed, format)?;
    write_or_print(output, &json)?;

    if !parsed.validation.is_valid {
        eprintln!(
            "{} confidence {}/100, review every field",
            "Low confidence:".yellow().bold(),
            parsed.validation.confidence
        );
    }
    Ok(())
}

fn cmd_text(input: &Path, output: Option<&Path>, args: &ParseArgs) -> CliResult {
    let parsed = args.parse(input)?;
    write_or_print(output, &parsed.text)
}

fn cmd_sections(input: &Path, args: &ParseArgs) -> CliResult {
    let parsed = args.parse(input)?;

    println!("{}", "Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    print!("{}", sections_outline(&parsed));

    if !parsed.tables.is_empty() {
        println!();
        println!("{}", "Tables".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for table in &parsed.tables {
            println!(
                "page {}: {} rows x {} columns",
                table.page,
                table.row_count(),
                table.column_count()
            );
        }
    }
    Ok(())
}

fn cmd_validate(input: &Path, args: &ParseArgs) -> CliResult {
    let parsed = args.parse(input)?;
    let profile = &parsed.profile;

    println!("{}", "Document".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    if let Some(media) = parsed.media_type {
        println!("{}: {}", "Format".bold(), media);
    }
    println!("{}: {}", "Pages".bold(), parsed.info.page_count);
    println!("{}: {}", "Characters".bold(), parsed.text.chars().count());

    println!();
    println!("{}", "Profile".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    let show = |label: &str, value: Option<&str>| {
        println!("{}: {}", label.bold(), value.unwrap_or("-"));
    };
    show("Name", profile.personal_info.name.as_deref());
    show("Email", profile.contact.email.as_deref());
    show("Phone", profile.contact.phone.as_deref());
    show("Location", profile.contact.location.as_deref());
    println!("{}: {}", "Skills".bold(), profile.skills.len());
    println!("{}: {}", "Education".bold(), profile.education.len());
    println!(
        "{}: {}",
        "Experience".bold(),
        profile.work_experience.iter().filter(|w| !w.is_blank()).count()
    );

    println!();
    let report = validation_report(&parsed.validation);
    if parsed.validation.is_valid {
        print!("{}", report.green());
    } else {
        print!("{}", report.yellow());
    }
    Ok(())
}

fn cmd_batch(inputs: &[PathBuf], delay_ms: u64, output: Option<&Path>, args: &ParseArgs) -> CliResult {
    let parser = args.parser()?;
    if let Some(dir) = output {
        fs::create_dir_all(dir)?;
    }

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    log::debug!("Batch of {} documents, {}ms between documents", inputs.len(), delay_ms);

    let mut ok = 0usize;
    let mut failed = 0usize;
    let mut summary = Vec::with_capacity(inputs.len());
    for (index, input) in inputs.iter().enumerate() {
        if index > 0 && delay_ms > 0 {
            thread::sleep(Duration::from_millis(delay_ms));
        }
        pb.set_message(input.display().to_string());

        let json = match parser.parse_path(input) {
            Ok(parsed) => {
                ok += 1;
                summary.push(serde_json::json!({
                    "file": input.display().to_string(),
                    "confidence": parsed.validation.confidence,
                    "isValid": parsed.validation.is_valid,
                }));
                render::to_json(&parsed, JsonFormat::Pretty)?
            }
            Err(e) => {
                failed += 1;
                let failure = Failure::from(&e);
                pb.println(format!("{} {}: {}", "Failed".red(), input.display(), e));
                summary.push(serde_json::json!({
                    "file": input.display().to_string(),
                    "failure": &failure,
                }));
                render::to_json(&failure, JsonFormat::Pretty)?
            }
        };

        if let Some(dir) = output {
            let stem = input.file_stem().unwrap_or_default().to_string_lossy();
            fs::write(dir.join(format!("{}.json", stem)), json)?;
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    if let Some(dir) = output {
        fs::write(
            dir.join("summary.json"),
            serde_json::to_string_pretty(&summary)?,
        )?;
    } else {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    println!(
        "\n{} {} parsed, {} failed",
        "Batch complete:".green().bold(),
        ok,
        failed
    );
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "cvparse".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Resume to candidate profile extraction tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_arguments() {
        let cli = Cli::try_parse_from([
            "cvparse", "batch", "a.pdf", "b.docx", "--delay-ms", "250", "--lenient",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Batch {
                inputs,
                delay_ms,
                output,
                parse,
            }) => {
                assert_eq!(inputs, vec![PathBuf::from("a.pdf"), PathBuf::from("b.docx")]);
                assert_eq!(delay_ms, 250);
                assert!(output.is_none());
                assert!(parse.lenient);
                assert!(!parse.no_tables);
            }
            _ => panic!("expected batch command"),
        }
    }

    #[test]
    fn test_batch_records_failures() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let missing = dir.path().join("missing.pdf");

        cmd_batch(&[missing], 0, Some(&out), &ParseArgs::default()).unwrap();

        let failure: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("missing.json")).unwrap()).unwrap();
        assert_eq!(failure["kind"], "fileNotFound");

        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("summary.json")).unwrap()).unwrap();
        assert_eq!(summary.as_array().unwrap().len(), 1);
        assert_eq!(summary[0]["failure"]["kind"], "fileNotFound");
    }
}
