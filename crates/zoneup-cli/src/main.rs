// # zoneup - record upsert CLI
//
// Thin integration layer over `zoneup-core`:
// 1. Parse the `upsert` subcommand flags
// 2. Build the Route 53 client from the default AWS configuration chain
// 3. Run the upsert, streaming progress to stderr
// 4. Map any failure to exit code 1
//
// All record and zone logic lives in `zoneup-core`; nothing here should
// grow beyond argument plumbing.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use zoneup_core::types::HostedZone;
use zoneup_core::upsert::{
    NoopProgress, ProgressSink, UpsertProgress, UpsertRequest, upsert_with_progress,
};
use zoneup_provider_route53::Route53Zones;

#[derive(Parser)]
#[command(
    name = "zoneup",
    version,
    about = "Upsert DNS records into their hosted zones"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upsert a resource record set
    Upsert(UpsertArgs),
}

#[derive(Args, Debug)]
struct UpsertArgs {
    /// The DNS name for the record set
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// The target IP address(es) for an A record or DNS name(s) for a CNAME
    /// record; repeat for multiple values
    #[arg(short = 't', long = "target")]
    targets: Vec<String>,

    /// The time-to-live for the record, in seconds
    #[arg(long)]
    ttl: Option<i64>,

    /// Whether to use the private hosted zone
    #[arg(long)]
    private: bool,

    /// A comment for the change
    #[arg(short = 'c', long)]
    comment: Option<String>,

    /// The AWS region
    #[arg(long)]
    region: Option<String>,

    /// Suppress output
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn visibility(zone: &HostedZone) -> &'static str {
    if zone.private { "private" } else { "public" }
}

/// Progress sink that prints `[record name]`-prefixed lines to stderr
struct ConsoleProgress {
    verbose: bool,
}

impl ProgressSink for ConsoleProgress {
    fn notify(&self, progress: &UpsertProgress) {
        match progress {
            UpsertProgress::ResolvingZone { name } => {
                if self.verbose {
                    eprintln!("[{name}] Finding hosted zone...");
                }
            }
            UpsertProgress::ZoneResolved { name, zone } => {
                if self.verbose {
                    eprintln!(
                        "[{name}] Found hosted zone: {} ({} {})",
                        zone.id,
                        zone.name,
                        visibility(zone)
                    );
                }
            }
            UpsertProgress::RecordUnchanged { name } => {
                eprintln!("[{name}] An identical record already exists");
            }
            UpsertProgress::SubmittingChange { name, batch, .. } => {
                eprintln!("[{name}] Submitting change batch...");
                if self.verbose {
                    if let Ok(json) = serde_json::to_string_pretty(batch) {
                        eprintln!("{json}");
                    }
                }
            }
            UpsertProgress::ChangeSubmitted { name, change_id } => {
                if self.verbose {
                    eprintln!("[{name}] Change submitted: {change_id}");
                }
            }
            UpsertProgress::WaitingForChange { name, .. } => {
                eprintln!("[{name}] Waiting for change to complete...");
            }
            UpsertProgress::RecordUpserted { name, zone } => {
                eprintln!(
                    "[{name}] Created record in {} ({} {})",
                    zone.id,
                    zone.name,
                    visibility(zone)
                );
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Upsert(args) => run_upsert(args),
    }
}

fn run_upsert(args: UpsertArgs) -> ExitCode {
    let level = if args.quiet {
        Level::ERROR
    } else if args.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
        return ExitCode::from(1);
    }

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create tokio runtime: {e}");
            return ExitCode::from(1);
        }
    };

    let quiet = args.quiet;
    let result = rt.block_on(async {
        let client = Route53Zones::from_env(args.region.clone()).await;
        let progress: Box<dyn ProgressSink> = if args.quiet {
            Box::new(NoopProgress)
        } else {
            Box::new(ConsoleProgress {
                verbose: args.verbose,
            })
        };
        let request = UpsertRequest {
            name: args.name,
            targets: args.targets,
            ttl: args.ttl,
            private: args.private,
            comment: args.comment,
            ..UpsertRequest::new()
        };
        upsert_with_progress(&client, request, progress.as_ref()).await
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if !quiet {
                eprintln!("Error: {err}");
            }
            ExitCode::from(1)
        }
    }
}
