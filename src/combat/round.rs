//! One roster against another until a side runs out of characters.

use serde::Serialize;
use tracing::{debug, warn};

use crate::combat::characters::Character;
use crate::combat::engine::{play_turn, CombatRules, Side, TurnRecord};
use crate::combat::error::CombatError;
use crate::combat::rng::DecisionSource;

/// Ordered characters for one side of a round, consumed front to back.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Roster {
    pub label: String,
    pub characters: Vec<Character>,
}

impl Roster {
    pub fn new(label: impl Into<String>, characters: Vec<Character>) -> Self {
        Self {
            label: label.into(),
            characters,
        }
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundReport {
    /// `None` when both sides defeated the same number of characters.
    pub winner: Option<Side>,
    /// Opponent characters defeated by your side.
    pub your_defeats: usize,
    /// Your characters defeated by the opponent side.
    pub opponent_defeats: usize,
    pub turn_limit_reached: bool,
    pub turns: Vec<TurnRecord>,
}

impl RoundReport {
    pub fn won_by(&self, side: Side) -> bool {
        self.winner == Some(side)
    }

    pub fn log(&self) -> impl Iterator<Item = &str> {
        self.turns.iter().map(|turn| turn.description.as_str())
    }
}

/// Play a round where `first_mover` attacks on every turn.
///
/// The active index of the defending side advances once its character is at
/// 0 HP; the round ends when either index runs past its roster. It is cut
/// short only by an explicit turn cap in `rules`, or once no damage has landed
/// for `rules.stall_turn_limit` turns in a row.
pub fn play_round(
    yours: &mut Roster,
    opponents: &mut Roster,
    first_mover: Side,
    decisions: &mut dyn DecisionSource,
    rules: &CombatRules,
) -> Result<RoundReport, CombatError> {
    let your_turn = first_mover == Side::Yours;
    let mut your_index = 0;
    let mut opponent_index = 0;
    let mut turns = Vec::new();
    let mut turn_limit_reached = false;
    let mut stalled_turns = 0u32;

    while your_index < yours.len() && opponent_index < opponents.len() {
        if let Some(limit) = rules.max_turns_per_round {
            if turns.len() >= limit as usize {
                warn!(
                    limit,
                    yours = %yours.label,
                    opponents = %opponents.label,
                    "round stopped at turn limit"
                );
                turn_limit_reached = true;
                break;
            }
        }
        if stalled_turns >= rules.stall_turn_limit {
            warn!(
                stalled_turns,
                yours = %yours.label,
                opponents = %opponents.label,
                "round stopped after turns without damage"
            );
            turn_limit_reached = true;
            break;
        }

        let your_character = &mut yours.characters[your_index];
        let opponent_character = &mut opponents.characters[opponent_index];
        let record = play_turn(your_character, opponent_character, your_turn, decisions)?;
        if record.damage_dealt > 0.0 {
            stalled_turns = 0;
        } else {
            stalled_turns += 1;
        }
        turns.push(record);

        match first_mover {
            Side::Yours if opponent_character.is_defeated() => opponent_index += 1,
            Side::Opponent if your_character.is_defeated() => your_index += 1,
            _ => {}
        }
    }

    let winner = match opponent_index.cmp(&your_index) {
        std::cmp::Ordering::Greater => Some(Side::Yours),
        std::cmp::Ordering::Less => Some(Side::Opponent),
        std::cmp::Ordering::Equal => None,
    };

    debug!(
        ?winner,
        your_defeats = opponent_index,
        opponent_defeats = your_index,
        turns = turns.len(),
        "round finished"
    );

    Ok(RoundReport {
        winner,
        your_defeats: opponent_index,
        opponent_defeats: your_index,
        turn_limit_reached,
        turns,
    })
}
