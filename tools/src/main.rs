//! sim-runner: headless runner for the business simulation.
//!
//! Usage:
//!   sim-runner --student "Ada" --project-type tech --budget high --marketing influencer \
//!              --complexity Advanced --cybersecurity enterprise --ai advanced --seed 42
//!   sim-runner --db runs.db --leaderboard
//!   sim-runner --db runs.db --ipc-mode

use anyhow::Result;
use bizsim_core::{
    config::EngineConfig,
    decisions::Decisions,
    error::SimError,
    history::SimulationHistory,
    performance::PerformanceBand,
    rng::RngBank,
    simulation::Simulation,
    store::SimStore,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

const LEADERBOARD_SIZE: usize = 10;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Run {
        student_name: String,
        decisions: Decisions,
        #[serde(default)]
        seed: Option<u64>,
    },
    History {
        student_name: String,
    },
    Result {
        id: String,
    },
    Leaderboard {
        #[serde(default = "default_leaderboard_size")]
        limit: usize,
    },
    Compare {
        ids: Vec<String>,
    },
    Delete {
        id: String,
    },
    Quit,
}

fn default_leaderboard_size() -> usize {
    LEADERBOARD_SIZE
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let show_leaderboard = args.iter().any(|a| a == "--leaderboard");
    let db = flag_value(&args, "--db").unwrap_or(":memory:");

    let config = match flag_value(&args, "--config") {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let store = SimStore::open(db)?;
    store.migrate()?;

    if ipc_mode {
        return run_ipc_loop(&store, &config);
    }
    if show_leaderboard {
        return print_leaderboard(&store);
    }

    let student = flag_value(&args, "--student").unwrap_or("Anonymous");
    let seed = parse_seed(&args)?;
    let defaults = Decisions::default();
    let decisions = Decisions {
        project_type: parse_decision(&args, "--project-type", defaults.project_type)?,
        budget: parse_decision(&args, "--budget", defaults.budget)?,
        marketing: parse_decision(&args, "--marketing", defaults.marketing)?,
        complexity_level: parse_decision(&args, "--complexity", defaults.complexity_level)?,
        cybersecurity: parse_decision(&args, "--cybersecurity", defaults.cybersecurity)?,
        ai_integration: parse_decision(&args, "--ai", defaults.ai_integration)?,
    };

    println!("Business Simulation: sim-runner");
    println!("  student:   {student}");
    println!("  seed:      {seed}");
    println!("  db:        {db}");
    println!("  decisions: {}", decisions.summary());
    println!();

    let simulation = Simulation::record(student, decisions, seed, &config)?;
    store.save_simulation(&simulation)?;
    print_report(&simulation);
    Ok(())
}

fn run_ipc_loop(store: &SimStore, config: &EngineConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let Some(reply) = reply_to_line(store, config, &buffer) else {
            break;
        };
        writeln!(stdout, "{}", reply)?;
        stdout.flush()?;
    }
    Ok(())
}

/// One JSON reply per request line; `None` once the client sends `quit`.
fn reply_to_line(store: &SimStore, config: &EngineConfig, line: &str) -> Option<serde_json::Value> {
    let cmd: IpcCommand = match serde_json::from_str(line) {
        Ok(c) => c,
        Err(e) => return Some(serde_json::json!({ "error": e.to_string() })),
    };
    if matches!(cmd, IpcCommand::Quit) {
        return None;
    }
    let reply = match handle_command(store, config, cmd) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("IPC command failed: {e}");
            serde_json::json!({ "error": e.to_string() })
        }
    };
    Some(reply)
}

fn handle_command(
    store: &SimStore,
    config: &EngineConfig,
    cmd: IpcCommand,
) -> Result<serde_json::Value, SimError> {
    let reply = match cmd {
        IpcCommand::Run { student_name, decisions, seed } => {
            let seed = seed.unwrap_or_else(RngBank::entropy_seed);
            let simulation = Simulation::record(&student_name, decisions, seed, config)?;
            store.save_simulation(&simulation)?;
            serde_json::to_value(&simulation)?
        }
        IpcCommand::History { student_name } => {
            let simulations = store.history_for_student(&student_name)?;
            serde_json::json!({ "simulations": simulations })
        }
        IpcCommand::Result { id } => match store.simulation(&id)? {
            Some(simulation) => serde_json::to_value(&simulation)?,
            None => return Err(SimError::SimulationNotFound { id }),
        },
        IpcCommand::Leaderboard { limit } => {
            serde_json::json!({ "top_performers": store.leaderboard(limit)? })
        }
        IpcCommand::Compare { ids } => {
            let history = SimulationHistory::from_simulations(store.all_simulations()?);
            let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
            serde_json::to_value(history.compare(&ids)?)?
        }
        IpcCommand::Delete { id } => {
            serde_json::json!({ "deleted": store.delete_simulation(&id)? })
        }
        IpcCommand::Quit => serde_json::Value::Null,
    };
    Ok(reply)
}

fn print_report(sim: &Simulation) {
    let result = &sim.result;
    let perf = &result.performance;

    println!("=== SIMULATION REPORT ===");
    println!("  id:             {}", sim.id);
    println!("  created:        {}", sim.created_at.format("%Y-%m-%d %H:%M UTC"));
    println!("  overall score:  {}% ({})", sim.score, sim.band().label());
    for (name, value) in perf.dimensions() {
        println!("  {name:<14}  {value:>5.1}  {}", PerformanceBand::of(value).label());
    }
    println!("  volatility:     {:.1}%", result.market_volatility);
    println!("  growth rate:    {:.2}", result.growth_rate);

    println!();
    println!("=== 12-MONTH TRAJECTORY ===");
    for m in &result.monthly_data {
        println!(
            "  M{:<2} | Tech {:>5.1} | Fin {:>5.1} | Mkt {:>5.1} | Inn {:>5.1} | Revenue {}",
            m.month, m.tech, m.finance, m.market, m.innovation, m.revenue
        );
    }
    println!("  total revenue: {}", result.total_revenue());

    println!();
    println!("=== COMPETITORS ===");
    for c in &result.competitor_analysis {
        println!(
            "  {} | {} | share {:.1}% | strength {:.1}%",
            c.name, c.strategy, c.market_share, c.strength
        );
    }

    println!();
    println!("=== RISK FACTORS ===");
    print_list(&result.risk_factors);

    println!();
    println!("=== RECOMMENDATIONS ===");
    print_list(&result.recommendations);
}

fn print_list(items: &[String]) {
    if items.is_empty() {
        println!("  (none)");
    }
    for item in items {
        println!("  - {item}");
    }
}

fn print_leaderboard(store: &SimStore) -> Result<()> {
    let entries = store.leaderboard(LEADERBOARD_SIZE)?;
    println!("=== LEADERBOARD ===");
    if entries.is_empty() {
        println!("  (No simulations recorded yet)");
    }
    for (rank, e) in entries.iter().enumerate() {
        println!(
            "  {:>2}. {:<24} {:>3}%  {}",
            rank + 1,
            e.student_name,
            e.score,
            e.created_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// A malformed `--seed` is an error; only an absent one draws a fresh seed.
fn parse_seed(args: &[String]) -> Result<u64> {
    match flag_value(args, "--seed") {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| anyhow::anyhow!("Invalid --seed '{raw}': {e}")),
        None => Ok(RngBank::entropy_seed()),
    }
}

fn parse_decision<T: FromStr<Err = SimError>>(args: &[String], flag: &str, default: T) -> Result<T> {
    match flag_value(args, flag) {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(default),
    }
}
