mod input;

use clinic_core::*;
use clap::{Parser, Subcommand};
use input::Prompter;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "clinic-form")]
#[command(about = "Clinical data entry form with BMI calculation and CSV export", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory the CSV export is written to
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a data-entry session (default)
    Session {
        /// Password for the access gate; prompted for when omitted.
        /// The prompt does not hide what is typed.
        #[arg(long)]
        password: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        clinic_core::logging::init_with_level("debug");
    } else {
        clinic_core::logging::init();
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let output_dir = cli
        .output_dir
        .unwrap_or_else(|| config.export.output_dir.clone());

    match cli.command {
        Some(Commands::Session { password }) => cmd_session(password, &output_dir, &config),
        None => cmd_session(None, &output_dir, &config),
    }
}

fn cmd_session(password: Option<String>, output_dir: &Path, config: &Config) -> Result<()> {
    let gate = AccessGate::from_env(&config.access.secret_env)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());

    let password = match password {
        Some(p) => p,
        None => prompter.ask("Enter Password (input is visible): ")?.unwrap_or_default(),
    };

    if !gate.check_access(&password) {
        writeln!(
            prompter.output(),
            "Please enter the correct password to access the app."
        )?;
        return Err(Error::AccessDenied);
    }

    let mut session = Session::new();
    print_menu(prompter.output())?;

    loop {
        let Some(line) = prompter.ask("> ")? else {
            break;
        };

        match line.to_lowercase().as_str() {
            "" => continue,
            "save" | "s" => {
                let Some(fields) = prompter.collect_fields()? else {
                    writeln!(prompter.output(), "Record not saved.")?;
                    continue;
                };
                let feedback = session.dispatch(Action::Save(fields))?;
                let mark = if matches!(feedback, Feedback::Saved(_)) { "✓" } else { "✗" };
                writeln!(prompter.output(), "{} {}", mark, feedback.message())?;
            }
            "clear" | "c" => {
                let feedback = session.dispatch(Action::Clear)?;
                writeln!(prompter.output(), "ℹ {}", feedback.message())?;
            }
            "download" | "d" => match session.dispatch(Action::Download)? {
                Feedback::Export(ExportOutcome::Csv(export)) => {
                    let path = export.write_to(output_dir)?;
                    writeln!(
                        prompter.output(),
                        "✓ Exported {} records ({})",
                        export.rows,
                        export.mime_type
                    )?;
                    writeln!(prompter.output(), "  CSV: {}", path.display())?;
                }
                feedback => writeln!(prompter.output(), "ℹ {}", feedback.message())?,
            },
            "list" | "l" => display_records(prompter.output(), session.store())?,
            "json" => {
                let json = serde_json::to_string_pretty(session.store())?;
                writeln!(prompter.output(), "{}", json)?;
            }
            "help" | "h" | "?" => print_menu(prompter.output())?,
            "quit" | "q" | "exit" => break,
            other => writeln!(prompter.output(), "Unknown command: {}. Type 'help'.", other)?,
        }
    }

    tracing::info!(
        "Session {} ended with {} records",
        session.id(),
        session.store().len()
    );
    Ok(())
}

fn print_menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "╭─────────────────────────────────────────╮")?;
    writeln!(out, "│  Clinical Data Entry Form               │")?;
    writeln!(out, "╰─────────────────────────────────────────╯")?;
    writeln!(out, "  save      enter and save a record")?;
    writeln!(out, "  clear     clear the form")?;
    writeln!(out, "  download  export records as CSV")?;
    writeln!(out, "  list      show saved records")?;
    writeln!(out, "  json      show saved records as JSON")?;
    writeln!(out, "  quit      end the session")?;
    Ok(())
}

fn display_records(out: &mut impl Write, store: &RecordStore) -> io::Result<()> {
    writeln!(out, "── Saved Records ──")?;
    if store.is_empty() {
        writeln!(out, "No records saved yet.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:>3}  {:>3}  {:<1}  {:>7}  {:>7}  {:>6}  {:>6}  {:<9}  {:>5}  {:>3} {:>3} {:>4}  {:<10}  {}",
        "#", "AGE", "G", "WT(kg)", "HT(cm)", "BMI", "WAIST", "BP", "SUGAR", "HTN", "DM", "BOTH", "TREATMENT", "VISIT"
    )?;
    for (i, record) in store.iter().enumerate() {
        writeln!(
            out,
            "{:>3}  {:>3}  {:<1}  {:>7.1}  {:>7.1}  {:>6}  {:>6}  {:<9}  {:>5}  {:>3} {:>3} {:>4}  {:<10}  {}",
            i + 1,
            record.age,
            record.gender.code(),
            record.weight_kg,
            record.height_cm,
            optional(record.bmi),
            optional(record.waist_cm),
            record.bp,
            optional(record.blood_sugar),
            u8::from(record.has_htn),
            u8::from(record.has_diabetes),
            u8::from(record.has_both),
            record.treatment_code,
            record.visit_type,
        )?;
    }
    writeln!(out, "Total Records: {}", store.len())?;
    Ok(())
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "—".to_string(), |v| v.to_string())
}
