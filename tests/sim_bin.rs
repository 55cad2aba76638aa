use std::process::Command;

fn run_sim(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(args)
        .output()
        .expect("failed to run sim binary")
}

#[test]
fn sim_binary_smoke() {
    let output = run_sim(&["1", "medium", "hard"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    assert_eq!(v["seed"], 1);
    assert_eq!(v["A"]["policy"], "hunt_and_target");
    assert_eq!(v["B"]["policy"], "probability_density");
    assert!(v["turns"].as_u64().unwrap() >= 1);
    assert!(v["winner"].is_string() || v["winner"].is_null());
}

#[test]
fn sim_binary_is_deterministic() {
    let a = run_sim(&["42", "easy", "hard"]);
    let b = run_sim(&["42", "easy", "hard"]);
    assert!(a.status.success());
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn sim_binary_rejects_unknown_policy() {
    let output = run_sim(&["1", "medium", "impossible"]);
    assert!(!output.status.success());
}
