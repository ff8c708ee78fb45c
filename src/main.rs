use mutation_check::config::{self, Settings};
use mutation_check::github::{self, ActionsHost, ChecksClient, EventContext};
use mutation_check::output;
use mutation_check::reporter::{self, ActionHost};

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "mutation-check",
    version,
    about = "Score a mutation testing report and publish it as a GitHub check"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score the report and publish the result as a check run (GitHub Actions)
    Check(CheckArgs),
    /// Score the report locally without publishing anything
    Score(ScoreArgs),
}

#[derive(Args)]
struct CheckArgs {
    /// Path to the mutations.xml report
    #[arg(
        long,
        env = "INPUT_XML-REPORT-PATH",
        default_value = "target/pit-reports/mutations.xml"
    )]
    xml_report_path: PathBuf,
    /// Minimum test strength, in percent (0-100)
    #[arg(long, env = "INPUT_THRESHOLD", default_value = "90", allow_hyphen_values = true)]
    threshold: String,
    /// Mark the step failed when the test strength is below the threshold
    #[arg(
        long,
        env = "INPUT_FAIL-WORKFLOW",
        default_value = "false",
        value_parser = config::parse_flag,
        action = clap::ArgAction::Set
    )]
    fail_workflow: bool,
    /// Maximum number of findings annotated on the check (0-50)
    #[arg(
        long,
        env = "INPUT_MAX-ANNOTATIONS",
        default_value = "10",
        allow_hyphen_values = true
    )]
    max_annotations: String,
    /// Token used to create the check run
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    token: String,
    /// Repository as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: String,
    /// Commit of the triggering event
    #[arg(long, env = "GITHUB_SHA")]
    sha: String,
    /// Name of the triggering event
    #[arg(long, env = "GITHUB_EVENT_NAME", default_value = "push")]
    event_name: String,
    /// JSON payload of the triggering event
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    api_url: String,
    /// File step outputs are appended to
    #[arg(long, env = "GITHUB_OUTPUT")]
    output_file: Option<PathBuf>,
}

#[derive(Args)]
struct ScoreArgs {
    /// Path to the mutations.xml report
    report: PathBuf,
    /// Minimum test strength, in percent (0-100)
    #[arg(short, long, default_value = "90", allow_negative_numbers = true)]
    threshold: i64,
    /// Number of undetected mutants to list
    #[arg(long, default_value = "10")]
    max_findings: usize,
    /// Output JSON instead of human-readable text
    #[arg(long)]
    json: bool,
    /// Exit code only, no output
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Check(args) => cmd_check(args),
        Commands::Score(args) => cmd_score(args),
    };

    process::exit(exit_code);
}

fn cmd_check(args: CheckArgs) -> i32 {
    let mut host = ActionsHost::new(args.output_file.clone());

    if let Err(e) = run_check(&args, &mut host) {
        host.set_failed(&e.to_string());
    }

    if host.failed() { 1 } else { 0 }
}

fn run_check(args: &CheckArgs, host: &mut ActionsHost) -> mutation_check::Result<()> {
    let settings =
        Settings::from_inputs(&args.threshold, &args.max_annotations, args.fail_workflow)?;
    let event = EventContext::load(&args.event_name, &args.sha, args.event_path.as_deref())?;
    let target = github::check_target(&args.repository, &event)?;

    let result = mutation_check::run_pipeline(&args.xml_report_path, settings.threshold)?;

    let client = ChecksClient::new(args.api_url.as_str(), args.token.as_str());
    reporter::report(&result, settings.max_annotations, &target, &client, host);

    if settings.fail_workflow && !result.pass {
        host.set_failed(&format!(
            "Test strength is not good enough: {}% (required was {}%)",
            result.test_strength, result.threshold
        ));
    }
    Ok(())
}

fn cmd_score(args: ScoreArgs) -> i32 {
    let settings = match Settings::new(args.threshold, 0, false) {
        Ok(s) => s,
        Err(e) => {
            output::print_error(&e.to_string());
            return 2;
        }
    };

    let result = match mutation_check::run_pipeline(&args.report, settings.threshold) {
        Ok(r) => r,
        Err(e) => {
            output::print_error(&e.to_string());
            return 2;
        }
    };

    let exit_code = if result.pass { 0 } else { 1 };
    if args.quiet {
        return exit_code;
    }

    if args.json {
        match serde_json::to_string(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                output::print_error(&format!("Failed to serialize result: {}", e));
                return 2;
            }
        }
    } else {
        output::print_score_result(&result, &args.report, args.max_findings);
    }

    exit_code
}
