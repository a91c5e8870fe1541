use blockfall_core::types::BOARD_HEIGHT;
use blockfall_core::{GameSession, Grid};

use super::base::Policy;
use crate::action::decode_action_id;
use crate::place::{apply_placement, valid_action_ids};

/// Column statistics of a settled board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardFeatures {
    pub aggregate_height: u32,
    pub max_height: u32,
    /// Empty cells with a block somewhere above them in the same column.
    pub holes: u32,
    /// Sum of height differences between neighbouring columns.
    pub bumpiness: u32,
}

impl BoardFeatures {
    pub fn of(grid: &Grid) -> Self {
        let heights = grid.column_heights();
        let mut out = Self::default();

        for (col, &h) in heights.iter().enumerate() {
            let h = u32::from(h);
            out.aggregate_height += h;
            out.max_height = out.max_height.max(h);

            let top = BOARD_HEIGHT as usize - h as usize;
            for row in top..BOARD_HEIGHT as usize {
                if grid.cell(row, col).is_none() {
                    out.holes += 1;
                }
            }
        }

        for pair in heights.windows(2) {
            out.bumpiness += u32::from(pair[0].abs_diff(pair[1]));
        }

        out
    }
}

/// Linear evaluation weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicWeights {
    pub aggregate_height: f64,
    pub complete_lines: f64,
    pub holes: f64,
    pub bumpiness: f64,
}

impl Default for HeuristicWeights {
    /// Weights tuned for single-piece lookahead on a 10-wide board.
    fn default() -> Self {
        Self {
            aggregate_height: -0.510066,
            complete_lines: 0.760666,
            holes: -0.35663,
            bumpiness: -0.184483,
        }
    }
}

impl HeuristicWeights {
    pub fn score(&self, features: &BoardFeatures, rows_cleared: u32) -> f64 {
        self.aggregate_height * f64::from(features.aggregate_height)
            + self.complete_lines * f64::from(rows_cleared)
            + self.holes * f64::from(features.holes)
            + self.bumpiness * f64::from(features.bumpiness)
    }
}

/// Greedy one-piece policy: plays every reachable placement on a scratch
/// session and keeps the best-scoring board.
#[derive(Debug, Clone, Default)]
pub struct HeuristicPolicy {
    weights: HeuristicWeights,
}

impl HeuristicPolicy {
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    /// Score of placing and dropping `aid`; `None` if it is not playable.
    pub fn evaluate(&self, session: &GameSession, aid: usize) -> Option<f64> {
        let placement = decode_action_id(aid)?;
        let mut scratch = session.clone();
        apply_placement(&mut scratch, placement, true).ok()?;
        let event = scratch.take_last_event()?;
        if event.game_over {
            return Some(f64::NEG_INFINITY);
        }
        let features = BoardFeatures::of(scratch.grid());
        Some(self.weights.score(&features, event.rows_cleared))
    }
}

impl Policy for HeuristicPolicy {
    fn choose_action(&mut self, session: &GameSession) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for aid in valid_action_ids(session) {
            let Some(score) = self.evaluate(session, aid) else {
                continue;
            };
            // Strictly greater keeps the lowest id among ties.
            match best {
                Some((_, s)) if score <= s => {}
                _ => best = Some((aid, score)),
            }
        }
        best.map(|(aid, _)| aid)
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::types::PieceKind;

    #[test]
    fn features_of_simple_board() {
        let grid = Grid::from_ascii(&["I.........", "..........", "II.I......"]);
        let f = BoardFeatures::of(&grid);
        // Heights: 3, 1, 0, 1, 0...
        assert_eq!(f.aggregate_height, 5);
        assert_eq!(f.max_height, 3);
        assert_eq!(f.holes, 1);
        assert_eq!(f.bumpiness, 2 + 1 + 1 + 1);
    }

    #[test]
    fn completes_a_line_when_it_can() {
        let mut session = GameSession::with_seed(3);
        session.reset();
        *session.grid_mut() = Grid::from_ascii(&["IIIIIIII..", "IIIIIIII.."]);
        session.spawn_kind(PieceKind::O);

        let mut policy = HeuristicPolicy::default();
        let aid = policy.choose_action(&session).unwrap();
        assert_eq!(aid % 10, 8);

        let placement = decode_action_id(aid).unwrap();
        apply_placement(&mut session, placement, true).unwrap();
        assert_eq!(session.score(), 2);
        assert_eq!(session.grid().occupied_count(), 0);
    }

    #[test]
    fn evaluate_does_not_touch_the_session() {
        let mut session = GameSession::with_seed(9);
        session.reset();
        let before = session.snapshot();
        let policy = HeuristicPolicy::default();
        for aid in valid_action_ids(&session) {
            assert!(policy.evaluate(&session, aid).is_some());
        }
        assert_eq!(session.snapshot(), before);
    }
}
