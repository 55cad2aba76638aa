use battleship_sim::{GameConfig, MatchEngine, PolicyKind, Side};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: {} <seed> <policy-a> <policy-b>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let policy_a: PolicyKind = args[2].parse()?;
    let policy_b: PolicyKind = args[3].parse()?;

    let mut rng = SmallRng::seed_from_u64(seed);
    let engine = MatchEngine::new(GameConfig::default()).map_err(|e| anyhow::anyhow!(e))?;
    let result = engine
        .play(&mut rng, policy_a, policy_b)
        .map_err(|e| anyhow::anyhow!(e))?;

    let side = |side: Side| {
        let s = result.stats(side);
        json!({"policy": s.policy, "hits": s.hits, "misses": s.misses, "ships_sunk": s.ships_sunk})
    };
    let output = json!({
        "seed": seed,
        "winner": result.winner(),
        "turns": result.total_turns,
        "A": side(Side::A),
        "B": side(Side::B),
    });

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}
