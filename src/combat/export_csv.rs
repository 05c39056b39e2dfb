//! Per-turn CSV export of a match, one row per resolved turn.
//!
//! Columns: round, turn, attacker_side, attacker, defender, attack, missed,
//! damage_dealt, self_heal, attacker_hp, defender_hp, description. `missed` is
//! empty when the turn had no miss roll.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::combat::characters::AttackKind;
use crate::combat::engine::Side;
use crate::combat::matchup::MatchReport;

#[derive(Debug, Serialize)]
struct EventRow<'a> {
    round: usize,
    turn: usize,
    attacker_side: Side,
    attacker: &'a str,
    defender: &'a str,
    attack: AttackKind,
    missed: Option<bool>,
    damage_dealt: f64,
    self_heal: f64,
    attacker_hp: f64,
    defender_hp: f64,
    description: &'a str,
}

pub fn write_events_csv<W: Write>(report: &MatchReport, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (round_index, round) in report.rounds.iter().enumerate() {
        for (turn_index, turn) in round.turns.iter().enumerate() {
            csv_writer.serialize(EventRow {
                round: round_index + 1,
                turn: turn_index + 1,
                attacker_side: turn.attacker_side,
                attacker: &turn.attacker,
                defender: &turn.defender,
                attack: turn.attack,
                missed: turn.missed,
                damage_dealt: turn.damage_dealt,
                self_heal: turn.self_heal,
                attacker_hp: turn.attacker_hp,
                defender_hp: turn.defender_hp,
                description: &turn.description,
            })?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn export_events_csv(report: &MatchReport, path: impl AsRef<Path>) -> Result<(), csv::Error> {
    let file = File::create(path)?;
    write_events_csv(report, file)
}
