// CLI hosting shell for the mixcheck pipeline
//
// Thin presentation layer: parses structured inputs, drives one pipeline
// operation per invocation, and turns every pipeline error into a single
// user-facing message.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use mixcheck::pipeline::{summary_text, FeedbackForm, FeedbackPurpose, PainPoint, Relevance};
use mixcheck::{AppConfig, AppContext};

#[derive(Parser, Debug)]
#[command(
    name = "mixcheck",
    about = "Heuristic mixing-quality feedback for audio uploads"
)]
struct Cli {
    /// Path to a JSON config file (defaults apply when missing)
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze an audio file and persist the analysis record
    Analyze {
        /// User email (partition key for all records)
        #[arg(long)]
        email: String,
        /// Audio file to analyze (WAV/MP3)
        file: PathBuf,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        project_stage: Option<String>,
        /// Emit the full report as JSON instead of the text summary
        #[arg(long)]
        json: bool,
    },
    /// Re-analyze a file and merge feedback into its record
    Feedback {
        #[arg(long)]
        email: String,
        /// The audio file the feedback is about (matched by content)
        file: PathBuf,
        #[arg(long, value_enum, default_value = "just-checking")]
        purpose: FeedbackPurpose,
        #[arg(long)]
        purpose_detail: Option<String>,
        /// May be given multiple times
        #[arg(long = "pain-point", value_enum)]
        pain_points: Vec<PainPoint>,
        #[arg(long)]
        pain_point_detail: Option<String>,
        /// Satisfaction 1-10
        #[arg(long, default_value_t = 7)]
        rating: u8,
        #[arg(long)]
        reference: Option<String>,
        #[arg(long, value_enum, default_value = "yes")]
        relevance: Relevance,
        #[arg(long)]
        improvement: Option<String>,
        #[arg(long)]
        comments: Option<String>,
    },
    /// Dump a user's stored records as JSON lines
    Records {
        #[arg(long)]
        email: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli
        .config
        .as_ref()
        .map(AppConfig::load_from_file)
        .unwrap_or_default();
    let ctx = AppContext::new(config);

    match cli.command {
        Commands::Analyze {
            email,
            file,
            genre,
            project_stage,
            json,
        } => run_analyze(&ctx, &email, &file, genre, project_stage, json),
        Commands::Feedback {
            email,
            file,
            purpose,
            purpose_detail,
            pain_points,
            pain_point_detail,
            rating,
            reference,
            relevance,
            improvement,
            comments,
        } => {
            let form = FeedbackForm {
                purpose,
                purpose_detail,
                pain_points,
                pain_points_detail: pain_point_detail,
                self_rating: rating,
                reference,
                relevance,
                improvement,
                comments,
            };
            run_feedback(&ctx, &email, &file, &form)
        }
        Commands::Records { email } => run_records(&ctx, &email),
    }
}

fn run_analyze(
    ctx: &AppContext,
    email: &str,
    file: &PathBuf,
    genre: Option<String>,
    project_stage: Option<String>,
    json: bool,
) -> Result<ExitCode> {
    let (mut session, bytes, name) = open_session(ctx, email, file)?;

    let report = ctx.analyze(
        &mut session,
        &name,
        &bytes,
        genre.as_deref(),
        project_stage.as_deref(),
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if report.record_created {
            println!(
                "New project #{} recorded as {}",
                report.project_number, report.filename
            );
        } else {
            println!(
                "Updated project #{} ({})",
                report.project_number, report.filename
            );
        }
        println!();
        println!("{}", report.main_tip);
        println!();
        println!("{}", summary_text(&report));
    }

    Ok(ExitCode::from(0))
}

fn run_feedback(
    ctx: &AppContext,
    email: &str,
    file: &PathBuf,
    form: &FeedbackForm,
) -> Result<ExitCode> {
    let (mut session, bytes, name) = open_session(ctx, email, file)?;

    // Re-analyzing the same content resolves to the same record, so the
    // feedback below merges into it instead of duplicating
    ctx.analyze(&mut session, &name, &bytes, None, None)?;
    ctx.submit_feedback(&session, form)?;

    println!("Thank you for your feedback! (Record updated, not duplicated.)");
    Ok(ExitCode::from(0))
}

fn run_records(ctx: &AppContext, email: &str) -> Result<ExitCode> {
    for record in ctx.store().records_for(email) {
        println!("{}", serde_json::to_string(&record)?);
    }
    Ok(ExitCode::from(0))
}

fn open_session(
    ctx: &AppContext,
    email: &str,
    file: &PathBuf,
) -> Result<(mixcheck::Session, Vec<u8>, String)> {
    let session = ctx.register_user(email)?;
    let bytes = fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    Ok((session, bytes, name))
}
