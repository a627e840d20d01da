use anyhow::{Context, Result};
use backend::{
    filter_records, list_processes, list_processes_top, send_signal, signal_menu, ProcError,
    ProcessRecord, Signal, TopOptions, RESULT_CAP,
};
use clap::{Parser, Subcommand, ValueEnum};
use notify_rust::Notification;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "proc-reaper", version, about = "Search your processes and send them signals")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List running processes owned by a user
    List {
        /// User whose processes to list (defaults to the invoking user)
        #[arg(long)]
        user: Option<String>,
        /// Case-sensitive substring match against the command name
        #[arg(long)]
        filter: Option<String>,
        /// Maximum number of rows to print
        #[arg(long, default_value_t = RESULT_CAP)]
        limit: usize,
        /// Discovery strategy
        #[arg(long, value_enum, default_value_t = Source::Procfs)]
        source: Source,
    },
    /// Send a signal to a process (TERM by default)
    Signal {
        pid: i32,
        /// TERM, KILL or HUP
        #[arg(long, default_value = "TERM")]
        signal: Signal,
        /// Short command name, shown in the notification
        #[arg(long)]
        name: Option<String>,
        /// Skip the desktop notification
        #[arg(long)]
        no_notify: bool,
    },
    /// Show the alternate-signal menu for a process
    Menu { pid: i32, name: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Source {
    /// Structured /proc enumeration (preferred)
    Procfs,
    /// `top -bn1` scrape (portability fallback)
    Top,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        error!("{:#}", err);
        eprintln!("Error: {:#}", err);
        // Propagate the OS error code where one was reported.
        let code = err
            .downcast_ref::<ProcError>()
            .and_then(|e| e.code())
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::List {
            user,
            filter,
            limit,
            source,
        } => {
            let user = match user {
                Some(u) => u,
                None => invoking_user()?,
            };
            let records = match source {
                Source::Procfs => list_processes(&user)?,
                Source::Top => list_processes_top(&user, &TopOptions::default())?,
            };
            print_table(&filter_records(records, filter.as_deref(), limit));
            Ok(())
        }

        Commands::Signal {
            pid,
            signal,
            name,
            no_notify,
        } => {
            let target = name.unwrap_or_else(|| pid.to_string());
            match send_signal(pid, signal) {
                Ok(()) => {
                    println!("Sent {} to {} ({})", signal, target, pid);
                    if !no_notify {
                        notify("Done", &format!("Sent {} to {}", signal, target));
                    }
                    Ok(())
                }
                Err(err) => {
                    if !no_notify {
                        let body = match err.code() {
                            Some(code) => format!("kill failed with code {}", code),
                            None => "Check the logs".to_string(),
                        };
                        notify("Error", &body);
                    }
                    Err(err.into())
                }
            }
        }

        Commands::Menu { pid, name } => {
            for option in signal_menu(pid, &name) {
                println!("{:<18} {} ({})", option.label, option.name, option.pid);
            }
            Ok(())
        }
    }
}

/// The invoking OS user, from the environment like the launcher host would
/// resolve it.
fn invoking_user() -> Result<String> {
    std::env::var("USER").context("USER is not set; pass --user explicitly")
}

fn print_table(records: &[ProcessRecord]) {
    println!(
        "{:>8} {:>6} {:>6} {:<20} {}",
        "PID", "CPU%", "MEM%", "NAME", "COMMAND"
    );
    for record in records {
        println!(
            "{:>8} {:>6} {:>6} {:<20} {}",
            record.pid,
            percent(record.cpu_percent),
            percent(record.mem_percent),
            record.name,
            record.cmdline,
        );
    }
}

fn percent(value: Option<f32>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "-".to_string(),
    }
}

/// Fire-and-forget desktop notification; a failure here is logged but never
/// fails the action itself.
fn notify(summary: &str, body: &str) {
    if let Err(e) = Notification::new()
        .summary(summary)
        .body(body)
        .appname("proc-reaper")
        .show()
    {
        warn!("failed to show notification: {}", e);
    }
}
