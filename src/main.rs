use clap::Parser;
use pitch_contour::{AnalysisReport, ContourAnalyzer, Strategy};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "pitch-contour")]
#[command(about = "Extract a dominant-frequency contour from an audio file as JSON", long_about = None)]
struct Args {
    /// Path to the audio file to analyze
    file: Option<PathBuf>,

    /// Display name echoed back in the result (defaults to the file's base name)
    #[arg(long)]
    display_name: Option<String>,

    /// Pitch-estimation strategy
    #[arg(long, value_enum, default_value_t = Strategy::Peak)]
    strategy: Strategy,

    /// Decimation interval in seconds; 0 emits the native frame rate
    /// (defaults: 0.1 for peak, native rate for tracker)
    #[arg(long)]
    interval: Option<f64>,

    /// Verbose logging (stderr only; stdout carries just the JSON line)
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Missing path is reported before any analysis attempt, on stderr,
    // so a host reading stdout never sees a partial line
    let Some(file) = args.file else {
        let report = AnalysisReport::failure(
            "Unknown".to_string(),
            "Missing audio file path argument.".to_string(),
        );
        eprintln!("{}", to_json_line(&report));
        return ExitCode::FAILURE;
    };

    let mut analyzer = ContourAnalyzer::new().with_strategy(args.strategy);
    if let Some(interval) = args.interval {
        analyzer = analyzer.with_interval(interval);
    }

    let report = analyzer.analyze(&file, args.display_name.as_deref());
    println!("{}", to_json_line(&report));

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Emitted when report serialization itself fails, so the host still reads
/// well-formed JSON on its only channel
const SERIALIZATION_FAILURE_LINE: &str =
    r#"{"success":false,"error":"failed to serialize analysis report","filename":"Unknown"}"#;

/// Serialize a report to one JSON line. Serialization of these plain structs
/// cannot realistically fail; fall back to a fixed literal if it ever does.
fn to_json_line(report: &AnalysisReport) -> String {
    serde_json::to_string(report).unwrap_or_else(|_| SERIALIZATION_FAILURE_LINE.to_string())
}
