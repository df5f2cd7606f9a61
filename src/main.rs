//! CLI entry point for the semester result tool.
//!
//! Provides subcommands for the cohort dashboard, the paginated student
//! list, per-student details and report cards, chart data, and CSV export.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use semester_results::analyzers::aggregate::{cohort_chart, find_student, ranked};
use semester_results::analyzers::page::paginate;
use semester_results::analyzers::report::build_report_for;
use semester_results::output::{print_json, render_text_report, write_students_csv};
use semester_results::stats::CohortStats;
use semester_results::{ResultError, SubjectConfig, load_with_report};
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "semester_results")]
#[command(about = "Semester examination results: dashboard, ranks and report cards", long_about = None)]
struct Cli {
    /// Result spreadsheet (.xlsx, .xls, .ods or .csv)
    #[arg(short, long, env = "RESULT_FILE", default_value = "sem5_result.xlsx", global = true)]
    file: PathBuf,

    /// JSON file mapping subjects to their internal/external/total columns
    #[arg(long, env = "SUBJECTS_CONFIG", global = true)]
    subjects: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cohort summary: student count, averages and topper
    Dashboard,
    /// List students in sheet order, 20 per page
    Students {
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Show one student's record
    Student {
        #[arg(short, long)]
        enrollment: String,
    },
    /// Build a student's report card
    Report {
        #[arg(short, long)]
        enrollment: String,

        #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
        format: ReportFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Subject-wise totals for a student, or summed over the cohort
    Chart {
        #[arg(short, long)]
        enrollment: Option<String>,
    },
    /// Export every student with rank and result to CSV
    Export {
        #[arg(short, long, default_value = "students.csv")]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Json,
    Text,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/semester_results.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("semester_results.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let exit_code = match run(cli) {
        Ok(()) => return Ok(()),
        Err(e) => match e.downcast_ref::<ResultError>() {
            Some(result_error) if result_error.is_not_found() => {
                warn!(error = %result_error, "Lookup miss");
                println!("Student not found");
                result_error.exit_code()
            }
            Some(result_error) => {
                error!(error = %result_error, "Failed to process result sheet");
                result_error.exit_code()
            }
            None => return Err(e),
        },
    };

    // flush the JSON log before exiting without unwinding
    drop(file_guard);
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<()> {
    let subjects = match &cli.subjects {
        Some(path) => SubjectConfig::load(path)?,
        None => SubjectConfig::default(),
    };
    info!(subjects = subjects.len(), file = %cli.file.display(), "Configuration loaded");

    let load = load_with_report(&cli.file, &subjects)?;
    if !load.warnings.is_empty() {
        warn!(
            count = load.warnings.len(),
            "Some numeric cells could not be read and were treated as missing"
        );
    }
    let records = load.records;

    match cli.command {
        Commands::Dashboard => {
            let stats = CohortStats::from_records(&records);
            println!("{}", print_json(&stats)?);
        }
        Commands::Students { page } => {
            let view = paginate(&records, page);
            if view.students.is_empty() {
                info!(page, total_pages = view.total_pages, "Page is out of range");
            }
            println!("{}", print_json(&view)?);
        }
        Commands::Student { enrollment } => {
            let student = find_student(&records, &enrollment)?;
            println!("{}", print_json(student)?);
        }
        Commands::Report {
            enrollment,
            format,
            out,
        } => {
            let report = build_report_for(&records, &enrollment, &subjects)?;
            let rendered = match format {
                ReportFormat::Json => print_json(&report)?,
                ReportFormat::Text => render_text_report(&report, Utc::now()),
            };

            match out {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    info!(path = %path.display(), "Report written");
                }
                None => println!("{rendered}"),
            }
        }
        Commands::Chart { enrollment } => {
            let data = match enrollment {
                Some(enrollment) => build_report_for(&records, &enrollment, &subjects)?.chart_data(),
                None => cohort_chart(&records, &subjects),
            };
            println!("{}", print_json(&data)?);
        }
        Commands::Export { out } => {
            let merit = ranked(&records);
            write_students_csv(&out, &merit)?;
            info!(path = %out.display(), students = merit.len(), "Export written");
        }
    }

    Ok(())
}
