use md5sig::{
    digest_async_reader, digest_files, run_self_test, sig_from_string, sig_to_string, Digest,
    Md5Error, SelfTestReport, DEFAULT_CHUNK_SIZE,
};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

const STDIN_NAME: &str = "-";

#[derive(Parser)]
#[command(name = "md5_t")]
#[command(about = "Compute MD5 signatures or run the RFC 1321 self-test", long_about = None)]
struct Cli {
    /// Files to hash, `-` reads standard input. Runs the self-test if omitted.
    #[arg(short = 'r', long = "read", value_name = "FILE", num_args = 1..)]
    read: Vec<PathBuf>,

    /// Size of each read when streaming input.
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE, value_parser = parse_chunk_size)]
    chunk_size: usize,
}

fn parse_chunk_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("chunk size must be greater than zero".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("{e}")),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.read.is_empty() {
        let report = run_self_test();
        print_report(&report);
        return if report.all_passed() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    match hash_inputs(&cli.read, cli.chunk_size).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_NAME
}

/// Print the signature of every input. Returns whether every input could be read.
async fn hash_inputs(inputs: &[PathBuf], chunk_size: usize) -> Result<bool, Md5Error> {
    let files: Vec<PathBuf> = inputs.iter().filter(|p| !is_stdin(p)).cloned().collect();
    let file_results = tokio::task::spawn_blocking(move || digest_files(&files, chunk_size))
        .await
        .map_err(std::io::Error::other)?;
    let mut file_results = file_results.into_iter();

    let mut all_read = true;
    for input in inputs {
        let result = if is_stdin(input) {
            digest_async_reader(tokio::io::stdin(), chunk_size).await
        } else {
            let Some(result) = file_results.next() else {
                break;
            };
            result
        };

        match result {
            Ok(digest) => print_signature(input, &digest)?,
            Err(e) => {
                eprintln!("{}", hash_failure_message(input, &e));
                all_read = false;
            }
        }
    }
    Ok(all_read)
}

fn hash_failure_message(input: &Path, error: &Md5Error) -> String {
    format!("failed to hash {}: {}", input.display(), error)
}

fn print_signature(input: &Path, digest: &Digest) -> Result<(), Md5Error> {
    let signature = sig_to_string(digest);
    let decoded = sig_from_string(&signature)?;

    println!("{:>25} '{}'", "Input:", input.display());
    println!("{:>25} '{:x}'", "Resulting signature:", digest);
    println!("{:>25} '{}'", "Results of md5_to_string:", signature);
    println!("{:>25} '{:x}'", "After md5_from_string:", decoded);
    Ok(())
}

fn print_report(report: &SelfTestReport) {
    for outcome in &report.outcomes {
        if outcome.hash_ok {
            println!(
                "Sig for '{}' matches '{}'",
                outcome.input, outcome.expected
            );
        } else {
            println!(
                "ERROR: Sig for '{}' is '{}' not '{}'",
                outcome.input, outcome.actual, outcome.expected
            );
        }
        if outcome.conversion_ok {
            println!("  String conversion also matches");
        } else {
            println!("  ERROR: String conversion for '{}' failed", outcome.actual);
        }
    }

    println!();
    println!("*******************************");
    println!("    {} of {} tests passed", report.passed, report.total);
    if !report.all_passed() {
        println!("  {} passed hashing check", report.hashing_passed);
        println!("  {} passed conversion check", report.conversion_passed);
    }
    println!("*******************************");
}
