// Placement-counting density map over the opponent board.

use alloc::vec;
use alloc::vec::Vec;

use crate::core::common::Shot;
use crate::core::knowledge::{CellKnowledge, Knowledge};
use crate::core::ship::Orientation;

/// Count, for every cell, how many legal ship runs cover it.
///
/// For each length in `lengths`, every start cell and both orientations are
/// tried. A run is legal when it stays on the board and none of its cells is a
/// known miss. Known hits do not block a run, so reasoning continues through a
/// partially hit ship. The result is row-major with `size * size` entries.
pub fn calc_density(knowledge: &Knowledge, lengths: &[usize]) -> Vec<u32> {
    let size = knowledge.size();
    let mut density = vec![0u32; size * size];

    for &len in lengths {
        if len == 0 || len > size {
            continue;
        }
        for r in 0..size {
            for c in 0..size {
                for orient in Orientation::ALL {
                    if !orient.fits(r, c, len, size) {
                        continue;
                    }
                    let blocked = (0..len).any(|k| {
                        let (rr, cc) = orient.step(r, c, k);
                        knowledge.state(rr, cc) == CellKnowledge::Miss
                    });
                    if blocked {
                        continue;
                    }
                    for k in 0..len {
                        let (rr, cc) = orient.step(r, c, k);
                        density[rr * size + cc] += 1;
                    }
                }
            }
        }
    }

    density
}

/// The unresolved cell with the highest count. Ties go to the first cell in
/// row-major order.
pub fn densest_unresolved(knowledge: &Knowledge, density: &[u32]) -> Option<Shot> {
    let size = knowledge.size();
    let mut best: Option<(Shot, u32)> = None;
    for r in 0..size {
        for c in 0..size {
            if knowledge.is_resolved(r, c) {
                continue;
            }
            let v = density[r * size + c];
            match best {
                Some((_, max)) if v <= max => {}
                _ => best = Some((Shot::new(r, c), v)),
            }
        }
    }
    best.map(|(shot, _)| shot)
}
