mod exporters;
mod presenter;
mod replay;
mod settings;
mod shell;

use clap::{Args, Parser, Subcommand, ValueEnum};
use exporters::FileExporter;
use presenter::{Verbosity, WizardPresenter};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use wizard_engine::{
    StepRegistry, SummaryExporter, Wizard, WriterExporter, build_step_view, render_json_ui,
    render_text,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Chat-style launch questionnaire in the terminal",
    long_about = "Walks through the launch questionnaire one step at a time and produces a shareable summary"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderMode {
    Text,
    Json,
}

/// Where the steps and wizard settings come from.
#[derive(Args)]
struct CatalogArgs {
    /// JSON file with a custom list of steps (defaults to the built-in questionnaire).
    #[arg(long, value_name = "STEPS", env = "LAUNCH_WIZARD_STEPS")]
    steps: Option<PathBuf>,
    /// JSON file with pacing, formatting and message overrides.
    #[arg(long, value_name = "CONFIG", env = "LAUNCH_WIZARD_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Answer the questionnaire interactively.
    Run {
        #[command(flatten)]
        catalog: CatalogArgs,
        /// Delay before each bot prompt, in milliseconds.
        #[arg(long, value_name = "MS", env = "LAUNCH_WIZARD_PACING_MS")]
        pacing_ms: Option<u64>,
        /// File that receives the summary on `:copy` (defaults to stdout).
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
        /// Show the sidebar, pacing and validation codes.
        #[arg(long, alias = "debug")]
        verbose: bool,
        /// Render output mode for the active step.
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
    /// Feed a JSON answer file through the wizard and print the summary text.
    Replay {
        #[command(flatten)]
        catalog: CatalogArgs,
        /// JSON object mapping step ids to answers.
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
        /// Write the summary text here instead of stdout.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Also print the timestamped conversation.
        #[arg(long)]
        transcript: bool,
        /// Echo the conversation to stderr while replaying.
        #[arg(long)]
        verbose: bool,
    },
    /// List the configured steps.
    Steps {
        #[command(flatten)]
        catalog: CatalogArgs,
        /// Print the step definitions as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Render a single step without running the wizard.
    Render {
        #[command(flatten)]
        catalog: CatalogArgs,
        /// Zero-based step index.
        #[arg(long, default_value_t = 0)]
        index: usize,
        /// Optional JSON file with answers used to prefill the step.
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
        /// Render output mode.
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
}

fn main() -> CliResult<()> {
    settings::init_logging();
    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            catalog,
            pacing_ms,
            export,
            verbose,
            format,
        } => run_interactive(catalog, pacing_ms, export, verbose, format),
        Command::Replay {
            catalog,
            answers,
            out,
            transcript,
            verbose,
        } => run_replay(catalog, answers, out, transcript, verbose),
        Command::Steps { catalog, json } => run_steps(catalog, json),
        Command::Render {
            catalog,
            index,
            answers,
            format,
        } => run_render(catalog, index, answers, format),
    }
}

fn build_wizard(catalog: &CatalogArgs, pacing_ms: Option<u64>) -> CliResult<Wizard> {
    let registry = settings::load_registry(catalog.steps.as_deref())?;
    let config = settings::load_config(catalog.config.as_deref(), pacing_ms)?;
    info!(
        steps = registry.len(),
        pacing_ms = config.pacing_ms,
        "wizard configured"
    );
    Ok(Wizard::new(registry, config))
}

fn run_interactive(
    catalog: CatalogArgs,
    pacing_ms: Option<u64>,
    export: Option<PathBuf>,
    verbose: bool,
    format: RenderMode,
) -> CliResult<()> {
    let wizard = build_wizard(&catalog, pacing_ms)?;
    let mut exporter: Box<dyn SummaryExporter> = match export {
        Some(path) => Box::new(FileExporter::new(path)),
        None => Box::new(WriterExporter::new(io::stdout())),
    };
    let mut presenter =
        WizardPresenter::new(io::stdout(), Verbosity::from_verbose(verbose), format);

    let state = shell::run_shell(&wizard, &mut presenter, io::stdin().lock(), exporter.as_mut())?;
    info!(
        complete = state.is_complete(),
        answered = state.answers().len(),
        "session ended"
    );
    Ok(())
}

fn run_replay(
    catalog: CatalogArgs,
    answers_path: PathBuf,
    out: Option<PathBuf>,
    transcript: bool,
    verbose: bool,
) -> CliResult<()> {
    let wizard = build_wizard(&catalog, Some(0))?;
    let answers = settings::load_answer_map(&answers_path)?;

    let mut echo = WizardPresenter::new(io::stderr(), Verbosity::Clean, RenderMode::Text);
    let state = replay::replay(&wizard, &answers, |events| {
        if verbose {
            echo.show_events(events)?;
        }
        Ok(())
    })?;
    let summary = wizard
        .summary(&state)
        .ok_or("replay finished before the wizard completed")?;

    if transcript {
        let mut presenter = WizardPresenter::new(io::stdout(), Verbosity::Clean, RenderMode::Text);
        presenter.show_transcript(state.transcript())?;
    }

    match out {
        Some(path) => {
            FileExporter::new(path.clone()).export(&summary.export_text())?;
            println!("Summary written to {}", path.display());
        }
        None => WriterExporter::new(io::stdout()).export(&summary.export_text())?,
    }
    Ok(())
}

fn run_steps(catalog: CatalogArgs, json: bool) -> CliResult<()> {
    let registry = settings::load_registry(catalog.steps.as_deref())?;
    if json {
        println!("{}", serde_json::to_string_pretty(registry.steps())?);
        return Ok(());
    }
    print_steps(&registry, &mut io::stdout())?;
    Ok(())
}

fn print_steps(registry: &StepRegistry, out: &mut impl Write) -> io::Result<()> {
    for (index, step) in registry.steps().iter().enumerate() {
        writeln!(
            out,
            "{}. {} [{}] {}",
            index + 1,
            step.id,
            step.kind.label(),
            step.title
        )?;
        if let Some(options) = step.kind.options() {
            for option in options {
                writeln!(out, "     - {}", option)?;
            }
        }
    }
    Ok(())
}

fn run_render(
    catalog: CatalogArgs,
    index: usize,
    answers_path: Option<PathBuf>,
    format: RenderMode,
) -> CliResult<()> {
    let wizard = build_wizard(&catalog, None)?;
    let answers = settings::load_answer_store(answers_path.as_deref())?;
    let view = build_step_view(
        wizard.registry(),
        wizard.config(),
        index,
        &answers,
        None,
        None,
    )
    .ok_or_else(|| {
        format!(
            "no step at index {} (the wizard has {} steps)",
            index,
            wizard.registry().len()
        )
    })?;

    match format {
        RenderMode::Text => println!("{}", render_text(&view)),
        RenderMode::Json => println!("{}", serde_json::to_string_pretty(&render_json_ui(&view))?),
    }
    Ok(())
}
