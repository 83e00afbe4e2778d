//! wagersim: terminal front-end.
//!
//! Loads configuration, initialises structured logging, then either runs
//! the Monte Carlo harness (`WAGERSIM_SIMULATE`) or an interactive session:
//! read a stake, resolve it, stage the reel reveal, print the outcome,
//! repeat until the balance is gone or the player cashes out.

use anyhow::{Context, Result};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

use wagersim::config::{AnimationConfig, AppConfig};
use wagersim::dashboard::{self, DashboardState};
use wagersim::engine::{OutcomeModel, StdRandom, WagerEngine};
use wagersim::presentation;
use wagersim::simulation::Simulator;
use wagersim::types::Symbol;

const BANNER: &str = r#"
  🎰 ───────────────────────── 🎰
        W A G E R S I M
  🎰 ───────────────────────── 🎰
"#;

const HELP: &str = "Type a stake and press Enter. `h` shows the balance history, `q` cashes out.";

type InputLines = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let cfg = AppConfig::load_or_default(&AppConfig::resolve_path())?;
    let model = cfg.outcome_model();

    if std::env::var("WAGERSIM_SIMULATE").is_ok() {
        return run_simulation(&cfg, model);
    }

    let rng = match seed_from_env()? {
        Some(seed) => {
            info!(seed, "Using fixed engine seed");
            StdRandom::seeded(seed)
        }
        None => StdRandom::from_os(),
    };
    let mut engine = WagerEngine::new(cfg.session.initial_balance, model, rng)?;

    let dashboard_state = if cfg.dashboard.enabled {
        let state = Arc::new(DashboardState::new(&engine, &cfg.session.currency));
        dashboard::spawn_dashboard(state.clone(), cfg.dashboard.port).await?;
        Some(state)
    } else {
        None
    };

    println!("{BANNER}");
    println!(
        "Game: {} | win chance ≈ {:.1}% | payout x{}",
        cfg.session.variant,
        engine.model().effective_win_rate() * 100.0,
        engine.model().payout_multiplier,
    );
    println!("{HELP}");
    println!("{}", presentation::balance_line(engine.balance(), &cfg.session.currency));

    run_session(&cfg, &mut engine, dashboard_state.as_deref()).await?;

    println!();
    println!(
        "{}",
        presentation::farewell(engine.state(), engine.balance(), &cfg.session.currency)
    );
    info!(
        state = ?engine.state(),
        balance = %engine.balance(),
        ledger = %engine.ledger(),
        "Session ended"
    );

    Ok(())
}

/// Interactive loop. Each stake is fully resolved and revealed before the
/// next line is read, so wagers never overlap.
async fn run_session(
    cfg: &AppConfig,
    engine: &mut WagerEngine,
    dashboard: Option<&DashboardState>,
) -> Result<()> {
    let currency = cfg.session.currency.as_str();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut cosmetic = StdRandom::from_os();

    while engine.is_active() {
        prompt("\n🎲 Stake: ")?;
        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            // End of input: cash out with whatever is left.
            engine.withdraw();
            break;
        };

        match line.trim() {
            "" => continue,
            "h" | "history" => {
                println!("📈 {}", presentation::sparkline(engine.history(), 60));
                println!("   {}", engine.ledger());
            }
            "q" | "quit" => {
                if confirm_withdraw(&mut lines, engine.balance(), currency).await? {
                    let amount = engine.withdraw();
                    info!(amount = %amount, "Cashed out");
                }
            }
            text => {
                let result = engine.resolve_wager_input(text);

                if result.accepted {
                    if let (Some(stake), Some(before)) = (result.stake, result.balance_before) {
                        if engine.model().stake_committed_upfront {
                            println!("{}", presentation::balance_line(before - stake, currency));
                        }
                    }
                    if let Some(symbols) = &result.symbols {
                        reveal(engine.model(), &cfg.animation, symbols, &mut cosmetic).await?;
                    }
                }

                println!("{}", presentation::render_result(&result, currency));
                if result.accepted {
                    println!("{}", presentation::balance_line(engine.balance(), currency));
                }

                if let Some(dashboard) = dashboard {
                    dashboard.sync(&*engine, Some(&result)).await;
                }
                continue;
            }
        }

        if let Some(dashboard) = dashboard {
            dashboard.sync(&*engine, None).await;
        }
    }

    Ok(())
}

/// Cosmetic spin: random frames, then the engine's final symbols.
async fn reveal(
    model: &OutcomeModel,
    animation: &AnimationConfig,
    final_symbols: &[Symbol],
    rng: &mut StdRandom,
) -> Result<()> {
    let delay = Duration::from_millis(animation.frame_delay_ms);
    let mut out = std::io::stdout();

    for frame in presentation::spin_frames(model, animation.spin_frames, rng) {
        write!(out, "\r   {}   ", presentation::render_symbols(&frame))?;
        out.flush()?;
        tokio::time::sleep(delay).await;
    }
    writeln!(out, "\r   {}   ", presentation::render_symbols(final_symbols))?;
    Ok(())
}

async fn confirm_withdraw(
    lines: &mut InputLines,
    balance: rust_decimal::Decimal,
    currency: &str,
) -> Result<bool> {
    prompt(&format!("🚪 Leave with {:.2} {currency}? [y/N] ", balance))?;
    let answer = lines.next_line().await.context("Failed to read stdin")?;
    Ok(matches!(
        answer.as_deref().map(str::trim),
        Some("y") | Some("Y") | Some("yes")
    ))
}

fn prompt(text: &str) -> Result<()> {
    let mut out = std::io::stdout();
    write!(out, "{text}")?;
    out.flush()?;
    Ok(())
}

fn run_simulation(cfg: &AppConfig, model: OutcomeModel) -> Result<()> {
    info!(
        sessions = cfg.simulation.sessions,
        stake = %cfg.simulation.stake,
        max_rounds = cfg.simulation.max_rounds,
        "Running simulation"
    );
    let report = Simulator::new(model)
        .run(&cfg.simulation)
        .context("Simulation failed")?;
    println!("{report}");
    Ok(())
}

fn seed_from_env() -> Result<Option<u64>> {
    std::env::var("WAGERSIM_SEED")
        .ok()
        .map(|s| s.trim().parse::<u64>())
        .transpose()
        .context("WAGERSIM_SEED must be an unsigned integer")
}

/// Initialise the `tracing` subscriber. Logs go to stderr so they do not
/// interleave with the game on stdout.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("wagersim=warn"));

    if std::env::var("WAGERSIM_LOG_JSON").is_ok() {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
