//! Best-of-N match over positionally paired rosters.

use serde::Serialize;
use tracing::debug;

use crate::combat::engine::{CombatRules, Side, TurnRecord};
use crate::combat::error::CombatError;
use crate::combat::rng::DecisionSource;
use crate::combat::round::{play_round, RoundReport, Roster};

/// Rosters for one round: yours against the opponent's.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundPairing {
    pub yours: Roster,
    pub opponents: Roster,
}

impl RoundPairing {
    pub fn new(yours: Roster, opponents: Roster) -> Self {
        Self { yours, opponents }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub first_mover: Side,
    pub your_points: u32,
    pub opponent_points: u32,
    pub rounds: Vec<RoundReport>,
}

impl MatchReport {
    /// `None` on an even tally.
    pub fn winner(&self) -> Option<Side> {
        match self.your_points.cmp(&self.opponent_points) {
            std::cmp::Ordering::Greater => Some(Side::Yours),
            std::cmp::Ordering::Less => Some(Side::Opponent),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Whether your side won the match.
    pub fn won(&self) -> bool {
        self.winner() == Some(Side::Yours)
    }

    pub fn events(&self) -> impl Iterator<Item = &TurnRecord> {
        self.rounds.iter().flat_map(|round| round.turns.iter())
    }

    /// Turn descriptions from every round, in order.
    pub fn log(&self) -> Vec<&str> {
        self.events().map(|turn| turn.description.as_str()).collect()
    }
}

/// Play every pairing in order. One draw at 50% decides the side that
/// attacks throughout the match; it happens before any round.
///
/// A round without a winner scores for the opponent side.
pub fn play_match(
    pairings: Vec<RoundPairing>,
    decisions: &mut dyn DecisionSource,
    rules: &CombatRules,
) -> Result<MatchReport, CombatError> {
    let first_mover = if decisions.draw(50.0) {
        Side::Yours
    } else {
        Side::Opponent
    };
    debug!(?first_mover, rounds = pairings.len(), "match started");

    let mut your_points = 0;
    let mut opponent_points = 0;
    let mut rounds = Vec::with_capacity(pairings.len());

    for (number, mut pairing) in pairings.into_iter().enumerate() {
        let report = play_round(
            &mut pairing.yours,
            &mut pairing.opponents,
            first_mover,
            decisions,
            rules,
        )?;
        if report.won_by(Side::Yours) {
            your_points += 1;
        } else {
            opponent_points += 1;
        }
        debug!(
            round = number + 1,
            yours = %pairing.yours.label,
            opponents = %pairing.opponents.label,
            won = report.won_by(Side::Yours),
            "round scored"
        );
        rounds.push(report);
    }

    Ok(MatchReport {
        first_mover,
        your_points,
        opponent_points,
        rounds,
    })
}
