//! Ball Clock CLI
//!
//! Interactive front end over the `ball_clock_core` engine. Prompts for a
//! ball count, runs the simulation, and reports how many days the clock
//! takes to return every ball to its original position, along with the
//! wall-clock processing time.
//!
//! Run with no arguments for the interactive prompt loop, or pass
//! `--balls N` for a single non-interactive computation.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: tracing filter (e.g. `ball_clock_core=trace`)

use anyhow::Result;
use ball_clock_core::{compute_cycle, CycleReport};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::time::Instant;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Smallest rack the interface accepts
const MIN_BALLS: usize = 27;

/// Largest rack the interface accepts
const MAX_BALLS: usize = 127;

/// Ball Clock - how many days until the balls return home?
#[derive(Parser, Debug)]
#[command(name = "ballclock")]
#[command(version, about, long_about = None)]
struct Args {
    /// Run once for this ball count and exit (27-127)
    #[arg(short, long)]
    balls: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Some(num_balls) = args.balls {
        if !(MIN_BALLS..=MAX_BALLS).contains(&num_balls) {
            anyhow::bail!(
                "ball count must be between {} and {}, got {}",
                MIN_BALLS,
                MAX_BALLS,
                num_balls
            );
        }
        let report = run_timed(num_balls)?;
        debug!(days = report.days, ticks = report.total_ticks, "run complete");
        return Ok(());
    }

    println!("Welcome To");
    println!("{}", BANNER);
    println!();
    println!("This program mimics a Ball Clock to calculate how many days");
    println!("it would take for balls running through the clock to return");
    println!("to their original starting positions.");
    println!();
    println!("Enjoy!");

    prompt_loop()
}

/// Read ball counts from stdin until the user quits
fn prompt_loop() -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!();
        println!("{}", RULE);
        println!("Enter the desired number of balls the clock will run.");
        print!(
            "Please choose a number between {} - {} (q to quit): ",
            MIN_BALLS, MAX_BALLS
        );
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            // stdin closed; treat like a quit
            None => break,
        };
        let input = line.trim();

        if input.eq_ignore_ascii_case("q") {
            break;
        }

        let num_balls: usize = match input.parse() {
            Ok(n) => n,
            Err(_) => {
                println!("You must enter a number.");
                continue;
            }
        };

        if !(MIN_BALLS..=MAX_BALLS).contains(&num_balls) {
            println!(
                "Please choose a number between {} and {}.",
                MIN_BALLS, MAX_BALLS
            );
            continue;
        }

        run_timed(num_balls)?;
        println!("{}", RULE);
        println!();
    }

    println!("Thank you for using the Ball Clock! May all your times be wonderful!");
    println!();
    Ok(())
}

/// Run one simulation, print the timed result line
fn run_timed(num_balls: usize) -> Result<CycleReport> {
    let started = Instant::now();
    let report = compute_cycle(num_balls)?;
    let elapsed = started.elapsed();

    println!();
    println!(
        "{} balls will take {} days. Processing time: {} Milliseconds",
        report.num_balls,
        report.days,
        elapsed.as_millis()
    );
    Ok(report)
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

const RULE: &str =
    "----------------------------------------------------------------------------";

const BANNER: &str = r"
    ____        _ _    ________           __
   / __ )____ _/ / /  / ____/ /___  _____/ /__
  / __  / __ `/ / /  / /   / / __ \/ ___/ //_/
 / /_/ / /_/ / / /  / /___/ / /_/ / /__/ ,<
/_____/\__,_/_/_/   \____/_/\____/\___/_/|_|
";
