//! Draft lottery simulator CLI.
//!
//! Run Monte Carlo simulations of the weighted draft lottery.
//!
//! Usage:
//!   draft-lottery [OPTIONS]
//!
//! Examples:
//!   draft-lottery                        # Prompt for simulations and rounds
//!   draft-lottery -s 100000 -r 2         # 100,000 two-round lotteries
//!   draft-lottery -s 1 --show-order      # One lottery, print its draft order
//!   draft-lottery -s 1000 --seed 42      # Reproducible run

use anyhow::{bail, Context};
use draft_lottery::build_info::version_line;
use draft_lottery::core::constants::{
    DEFAULT_ROUNDS, DEFAULT_SIMULATIONS, MIN_ROUNDS, MIN_SIMULATIONS,
};
use draft_lottery::{run_simulation, LotteryConfig, SimConfig};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

// ── CLI Configuration ────────────────────────────────────────────────

#[derive(Debug, Default)]
struct CliArgs {
    simulations: Option<u64>,
    rounds: Option<u32>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
    json: bool,
    show_order: bool,
    verbosity: u8,
}

enum Command {
    Run(CliArgs),
    Help,
    Version,
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let cli = match parse_args(&args) {
        Ok(Command::Run(cli)) => cli,
        Ok(Command::Help) => {
            print_help();
            return Ok(());
        }
        Ok(Command::Version) => {
            println!("{}", version_line());
            return Ok(());
        }
        Err(e) => {
            eprintln!("Command line error: {:#}", e);
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    init_tracing(cli.verbosity);

    let lottery = match &cli.config_path {
        Some(path) => LotteryConfig::load(path)
            .with_context(|| format!("failed to load lottery config {}", path.display()))?,
        None => LotteryConfig::default(),
    };

    // With at least one of -s/-r given, run without prompting
    let (simulations, rounds) = match (cli.simulations, cli.rounds) {
        (None, None) => {
            let table = lottery
                .build_table()
                .context("failed to build the combination table")?;
            let max_rounds = SimConfig::max_rounds(&lottery, &table);
            if max_rounds < MIN_ROUNDS {
                bail!("no rank owns a combination, so no lottery round can finish");
            }
            match prompt_settings(max_rounds)? {
                Some(settings) => settings,
                None => return Ok(()),
            }
        }
        (simulations, rounds) => (
            simulations.unwrap_or(DEFAULT_SIMULATIONS),
            rounds.unwrap_or(DEFAULT_ROUNDS),
        ),
    };

    let config = SimConfig {
        simulations,
        rounds,
        seed: cli.seed,
        verbosity: cli.verbosity,
        ..Default::default()
    };

    println!("Running simulation(s)...");
    println!();

    let start = Instant::now();
    let report = run_simulation(&lottery, &config).context("simulation failed")?;

    println!(
        "The simulation(s) took {:.3} seconds to complete",
        start.elapsed().as_secs_f64()
    );
    println!();

    if cli.show_order {
        println!("{}", report.final_order_text());
    }
    println!("{}", report.to_text());

    if cli.json {
        let filename = format!(
            "lottery_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json())
            .with_context(|| format!("failed to write {}", filename))?;
        println!("JSON report saved to: {}", filename);
    }

    Ok(())
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 | 2 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn parse_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> anyhow::Result<T> {
    let Some(raw) = args.get(i + 1) else {
        bail!("{} requires a value", flag);
    };
    raw.parse()
        .map_err(|_| anyhow::anyhow!("invalid value for {}: {}", flag, raw))
}

fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut cli = CliArgs {
        verbosity: 1,
        ..Default::default()
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-s" | "--simulations" => {
                let simulations: u64 = parse_value(args, i, "--simulations")?;
                if simulations < MIN_SIMULATIONS {
                    bail!("simulations must be at least {}", MIN_SIMULATIONS);
                }
                cli.simulations = Some(simulations);
                i += 1;
            }
            "-r" | "--rounds" => {
                let rounds: u32 = parse_value(args, i, "--rounds")?;
                if rounds < MIN_ROUNDS {
                    bail!("rounds must be at least {}", MIN_ROUNDS);
                }
                cli.rounds = Some(rounds);
                i += 1;
            }
            "--seed" => {
                cli.seed = Some(parse_value(args, i, "--seed")?);
                i += 1;
            }
            "-c" | "--config" => {
                cli.config_path = Some(parse_value(args, i, "--config")?);
                i += 1;
            }
            "--json" => cli.json = true,
            "--show-order" => cli.show_order = true,
            "-v" | "--verbose" => cli.verbosity = cli.verbosity.saturating_add(1),
            "-q" | "--quiet" => cli.verbosity = 0,
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            other => bail!("unknown option: {}", other),
        }
        i += 1;
    }

    Ok(Command::Run(cli))
}

/// Asks for the simulation count and round count. `None` means the user quit.
fn prompt_settings(max_rounds: u32) -> anyhow::Result<Option<(u64, u32)>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let Some(simulations) = prompt_number(
        &mut input,
        &format!(
            "Enter the number of simulations to run (>= {}; default = {})",
            MIN_SIMULATIONS, DEFAULT_SIMULATIONS
        ),
        DEFAULT_SIMULATIONS,
        |s| s >= MIN_SIMULATIONS,
    )?
    else {
        return Ok(None);
    };

    let Some(rounds) = prompt_rounds(&mut input, max_rounds)? else {
        return Ok(None);
    };

    Ok(Some((simulations, rounds)))
}

/// Asks for the round count, accepting only what the lottery's table can
/// resolve.
fn prompt_rounds(input: &mut impl BufRead, max_rounds: u32) -> anyhow::Result<Option<u32>> {
    let default = DEFAULT_ROUNDS.min(max_rounds);
    prompt_number(
        input,
        &format!(
            "Enter the number of lottery rounds (>= {} and <= {}; default = {})",
            MIN_ROUNDS, max_rounds, default
        ),
        default,
        |r| (MIN_ROUNDS..=max_rounds).contains(&r),
    )
}

/// Prompts until the answer is empty (default), valid, or `q`.
fn prompt_number<T, F>(
    input: &mut impl BufRead,
    message: &str,
    default: T,
    is_valid: F,
) -> anyhow::Result<Option<T>>
where
    T: FromStr + Copy,
    F: Fn(T) -> bool,
{
    loop {
        println!("{}", message);
        println!("- or -");
        println!("'q' to quit");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match line.trim() {
            "q" => return Ok(None),
            "" => return Ok(Some(default)),
            answer => {
                if let Ok(value) = answer.parse::<T>() {
                    if is_valid(value) {
                        return Ok(Some(value));
                    }
                }
            }
        }
    }
}

fn print_help() {
    println!("Draft Lottery Simulator");
    println!();
    println!("USAGE:");
    println!("    draft-lottery [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -s, --simulations <N>  Number of lottery simulations (default: 1)");
    println!("    -r, --rounds <N>       Lottery rounds per simulation (default: 2)");
    println!("        --seed <S>         Random seed for reproducibility");
    println!("    -c, --config <FILE>    Lottery description (TOML) to use instead of 2023");
    println!("        --show-order       Print the last simulation's draft order");
    println!("        --json             Save JSON report");
    println!("    -v, --verbose          More logging (repeat for per-draw detail)");
    println!("    -q, --quiet            Only warnings and the report");
    println!("    -V, --version          Print the version number and exit");
    println!("    -h, --help             Print the usage information and exit");
    println!();
    println!("Without -s or -r the simulator asks for both interactively.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_rounds_rejects_rounds_above_table_limit() {
        let mut input = Cursor::new("3\n0\nabc\n2\n");
        assert_eq!(prompt_rounds(&mut input, 2).unwrap(), Some(2));
    }

    #[test]
    fn test_prompt_rounds_default_respects_limit() {
        let mut input = Cursor::new("\n");
        assert_eq!(prompt_rounds(&mut input, 1).unwrap(), Some(1));

        let mut input = Cursor::new("\n");
        assert_eq!(prompt_rounds(&mut input, 3).unwrap(), Some(DEFAULT_ROUNDS));
    }

    #[test]
    fn test_prompt_rounds_quit_and_eof() {
        let mut input = Cursor::new("q\n");
        assert_eq!(prompt_rounds(&mut input, 3).unwrap(), None);

        let mut input = Cursor::new("");
        assert_eq!(prompt_rounds(&mut input, 3).unwrap(), None);
    }

    #[test]
    fn test_prompt_limit_follows_assignable_ranks() {
        let toml = r#"
            ball_count = 6
            balls_to_draw = 2
            max_rounds = 2

            [[odds]]
            rank = 1
            percentage = 60.0

            [[odds]]
            rank = 2
            percentage = 40.0

            [[teams]]
            ranking = 1
            team = "AAA"

            [[teams]]
            ranking = 2
            team = "BBB"
        "#;
        let lottery = LotteryConfig::from_toml_str(toml).unwrap();
        let table = lottery.build_table().unwrap();
        let max_rounds = SimConfig::max_rounds(&lottery, &table);
        assert_eq!(max_rounds, 1);

        let mut input = Cursor::new("2\n1\n");
        assert_eq!(prompt_rounds(&mut input, max_rounds).unwrap(), Some(1));
    }
}
