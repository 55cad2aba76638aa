#![cfg(feature = "std")]

//! Terminal rendering of boards, density maps and batch summaries.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::core::{BoardSnapshot, Cell, PairingSummary, RenderSink, Side, StatsSink};

fn column_label(c: usize) -> char {
    (b'A' + c as u8) as char
}

/// Draw a board snapshot into a string. Hidden ships read as water.
pub fn format_board(title: &str, snapshot: &BoardSnapshot, hide_ships: bool) -> String {
    let width = snapshot.size * 2 + 5;
    let bar = "═".repeat(width);
    let mut out = String::new();
    let _ = writeln!(out, "    {}", title);
    let _ = writeln!(out, "    ╔{}╗", bar);
    let _ = write!(out, "    ║   ");
    for c in 0..snapshot.size {
        let _ = write!(out, " {}", column_label(c));
    }
    let _ = writeln!(out, "  ║");
    let _ = writeln!(out, "    ╠{}╣", bar);
    for r in 0..snapshot.size {
        let _ = write!(out, "    ║ {:2}", r + 1);
        for c in 0..snapshot.size {
            let ch = match snapshot.cell(r, c) {
                Cell::Hit => 'X',
                Cell::Miss => 'o',
                Cell::Ship if !hide_ships => 'S',
                Cell::Ship | Cell::Empty => '.',
            };
            let _ = write!(out, " {}", ch);
        }
        let _ = writeln!(out, "  ║");
    }
    let _ = writeln!(out, "    ╚{}╝", bar);
    if hide_ships {
        let _ = writeln!(out, "    Legend: X=Hit  o=Miss  .=Unknown");
    } else {
        let _ = writeln!(out, "    Legend: S=Ship  X=Hit  o=Miss  .=Water");
    }
    out
}

/// Render sink that prints each board to stdout.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    frames: usize,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boards drawn so far.
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl RenderSink for TerminalRenderer {
    fn render(&mut self, owner: Side, snapshot: &BoardSnapshot, hide_ships: bool) {
        let title = format!("Fleet {}", owner);
        print!("{}", format_board(&title, snapshot, hide_ships));
        let _ = io::stdout().flush();
        self.frames += 1;
    }
}

/// Print a density map as produced by `calc_density`, row-major.
pub fn print_density_board(density: &[u32], size: usize) {
    println!("\nPlacement density:");
    print!("   ");
    for c in 0..size {
        print!(" {:>4}", column_label(c));
    }
    println!();
    for r in 0..size {
        print!("{:2} ", r + 1);
        for c in 0..size {
            print!(" {:4}", density[r * size + c]);
        }
        println!();
    }
}

/// Print one pairing's statistics as text.
pub fn print_summary(summary: &PairingSummary) {
    println!(
        "\n{} (A) vs {} (B), {} matches",
        summary.policy_a, summary.policy_b, summary.matches
    );
    println!(
        "  wins  A {:>5} ({:5.1}%)   B {:>5} ({:5.1}%)   draws {:>4} ({:5.1}%)",
        summary.a_wins,
        summary.a_win_pct,
        summary.b_wins,
        summary.b_win_pct,
        summary.draws,
        summary.draw_pct
    );
    println!(
        "  turns avg {:.1}  min {}  max {}  std dev {:.2}",
        summary.avg_turns, summary.min_turns, summary.max_turns, summary.turns_std_dev
    );
    let last = |trend: &[f64]| trend.last().copied().unwrap_or(0.0);
    println!(
        "  mean hits at turn {}: A {:.2}  B {:.2}",
        summary.trend_a.len(),
        last(&summary.trend_a),
        last(&summary.trend_b)
    );
}

/// Stats sink that prints each pairing as it is handed over.
#[derive(Debug, Default)]
pub struct TextSummarySink;

impl StatsSink for TextSummarySink {
    fn accept(&mut self, summary: &PairingSummary) {
        print_summary(summary);
    }
}
