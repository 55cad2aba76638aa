#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use battleship_sim::{
    calc_density, init_logging, print_density_board, publish, BatchConfig, BatchRunner,
    DensityLengths, FileReportStore, GameConfig, MatchEngine, MatchReport, PairingSummary,
    PolicyKind, ReportStore, Side, TerminalRenderer, TurnOrder,
};

#[cfg(feature = "std")]
use battleship_sim::cli::TextSummarySink;
#[cfg(feature = "std")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use std::path::PathBuf;
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum TurnOrderArg {
    /// A hit grants another shot.
    ExtraShot,
    /// Players swap after every shot.
    Alternate,
    /// Both players fire once per round.
    Rounds,
}

#[cfg(feature = "std")]
impl From<TurnOrderArg> for TurnOrder {
    fn from(arg: TurnOrderArg) -> Self {
        match arg {
            TurnOrderArg::ExtraShot => TurnOrder::ExtraShotOnHit,
            TurnOrderArg::Alternate => TurnOrder::Alternate,
            TurnOrderArg::Rounds => TurnOrder::Rounds,
        }
    }
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Play one match between two policies and show the boards.
    Match {
        #[arg(long, default_value = "easy", help = "Policy of side A (easy|medium|hard)")]
        policy_a: PolicyKind,
        #[arg(long, default_value = "hard", help = "Policy of side B (easy|medium|hard)")]
        policy_b: PolicyKind,
        #[arg(long, help = "Fix RNG seed for reproducible matches (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = TurnOrderArg::ExtraShot)]
        turn_order: TurnOrderArg,
        #[arg(long, help = "Override the turn ceiling")]
        max_turns: Option<usize>,
        #[arg(long, default_value = "fleet", help = "Density lengths: fleet, legacy or e.g. 5,3,2")]
        density_lengths: DensityLengths,
        #[arg(long, help = "Show ship positions on both boards")]
        reveal: bool,
        #[arg(long, help = "Print side A's density map after every turn")]
        show_density: bool,
        #[arg(long, default_value_t = 0, help = "Pause between turns, halved after a hit")]
        delay_ms: u64,
        #[arg(long, default_value = "battleship-report.json")]
        report: PathBuf,
    },
    /// Run every pairing many times and print aggregate statistics.
    Batch {
        #[arg(long, short = 'n', default_value_t = 100)]
        count: usize,
        #[arg(long, help = "Fix RNG seed for reproducible batches (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = TurnOrderArg::Rounds)]
        turn_order: TurnOrderArg,
        #[arg(long, default_value = "fleet")]
        density_lengths: DensityLengths,
        #[arg(long, default_value_t = battleship_sim::DEFAULT_TIMELINE_HORIZON)]
        horizon: usize,
        #[arg(long, help = "Print summaries as JSON")]
        json: bool,
    },
    /// Print the last stored match report.
    Report {
        #[arg(long, default_value = "battleship-report.json")]
        path: PathBuf,
    },
}

#[cfg(feature = "std")]
fn seeded_rng(seed: Option<u64>) -> SmallRng {
    if let Some(s) = seed {
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(log::LevelFilter::Info)?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Match {
            policy_a,
            policy_b,
            seed,
            turn_order,
            max_turns,
            density_lengths,
            reveal,
            show_density,
            delay_ms,
            report,
        } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (match will be reproducible)", s);
            }
            let config = GameConfig {
                turn_order: turn_order.into(),
                max_turns,
                density_lengths,
                ..GameConfig::default()
            };
            let engine = MatchEngine::new(config).map_err(|e| anyhow::anyhow!(e))?;
            let lengths = engine.config().density_lengths();
            let mut rng = seeded_rng(seed);
            let mut session = engine
                .session(&mut rng, policy_a, policy_b)
                .map_err(|e| anyhow::anyhow!(e))?;
            let mut renderer = TerminalRenderer::new();
            println!("{} (A) vs {} (B)", policy_a, policy_b);

            while let Some(turn) = session.step(&mut rng).map_err(|e| anyhow::anyhow!(e))? {
                println!("\n── Turn {} ──", turn.number);
                for shot in &turn.shots {
                    println!(
                        "  {} fires at {}{}: {:?}",
                        shot.shooter,
                        (b'A' + shot.shot.col as u8) as char,
                        shot.shot.row + 1,
                        shot.outcome
                    );
                    if delay_ms > 0 {
                        let pause = if shot.outcome.is_hit() { delay_ms / 2 } else { delay_ms };
                        tokio::time::sleep(Duration::from_millis(pause)).await;
                    }
                }
                session.render(&mut renderer, [reveal, reveal]);
                if show_density {
                    let density = calc_density(session.knowledge(Side::A), &lengths);
                    print_density_board(&density, engine.config().size);
                }
            }

            let result = session.into_result();
            match result.winner() {
                Some(side) => println!(
                    "\nSide {} ({}) wins after {} turns.",
                    side,
                    result.stats(side).policy,
                    result.total_turns
                ),
                None => println!("\nDraw: turn ceiling reached after {} turns.", result.total_turns),
            }
            for side in [Side::A, Side::B] {
                let s = result.stats(side);
                println!(
                    "  {}: {} hits, {} misses, {} ships sunk",
                    side, s.hits, s.misses, s.ships_sunk
                );
            }

            let store = FileReportStore::new(report);
            store
                .save(&MatchReport::now(engine.config(), &result))
                .await?;
            println!("Report saved to {}", store.path().display());
        }
        Commands::Batch {
            count,
            seed,
            turn_order,
            density_lengths,
            horizon,
            json,
        } => {
            let mut config = BatchConfig::new(count);
            config.game.turn_order = turn_order.into();
            config.game.density_lengths = density_lengths;
            config.timeline_horizon = horizon;
            let runner = BatchRunner::new(config, seeded_rng(seed)).map_err(|e| anyhow::anyhow!(e))?;
            let stats = runner.run_async().await.map_err(|e| anyhow::anyhow!(e))?;
            if json {
                let mut summaries: Vec<PairingSummary> = Vec::new();
                publish(&stats, &mut summaries);
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                publish(&stats, &mut TextSummarySink);
            }
        }
        Commands::Report { path } => {
            let store = FileReportStore::new(path);
            match store.load().await? {
                Some(report) => println!("{}", serde_json::to_string_pretty(&report)?),
                None => println!("No report stored at {}", store.path().display()),
            }
        }
    }
    Ok(())
}
