use skirmish::combat::{
    play_turn, AttackKind, Character, CharacterKind, CombatError, DecisionSource, Item, ItemKind,
    MagicResistancePolicy, ScriptedDecisions, SeededDecisions, Side, StatVector,
    ALL_CHARACTER_KINDS, ALL_ITEM_KINDS,
};

fn approx_eq(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "expected {b}, got {a}");
}

fn character(kind: CharacterKind, physical_power: f64, magic_power: f64) -> Character {
    Character::new(
        kind,
        StatVector {
            physical_power,
            magic_power,
            ..StatVector::with_hp(200.0)
        },
    )
}

fn undefended(hp: f64) -> Character {
    Character::new(CharacterKind::Mage, StatVector::with_hp(hp))
}

#[test]
fn combination_invariants_hold_over_a_grid_of_deltas() {
    let values = [-250.0, -60.0, -1.0, 0.0, 0.5, 40.0, 180.0];
    let base = StatVector {
        current_hp: 50.0,
        total_hp: 120.0,
        armor: 15.0,
        magic_resistance: 10.0,
        physical_power: 5.0,
        magic_power: 5.0,
        special_trigger_chance: 60.0,
    };
    for &hp in &values {
        for &total in &values {
            for &other in &values {
                let delta = StatVector {
                    current_hp: hp,
                    total_hp: total,
                    armor: other,
                    magic_resistance: other,
                    physical_power: other,
                    magic_power: other,
                    special_trigger_chance: other,
                };
                let out = base.combine(&delta);
                assert!(out.current_hp >= 0.0 && out.current_hp <= out.total_hp, "{out:?}");
                assert!(out.total_hp >= 0.0);
                assert!(out.armor >= 0.0);
                assert!((0.0..=100.0).contains(&out.special_trigger_chance));
            }
        }
    }
}

#[test]
fn magic_resistance_floor_is_policy_driven() {
    let base = StatVector {
        magic_resistance: 5.0,
        ..StatVector::with_hp(10.0)
    };
    let delta = StatVector {
        magic_resistance: -8.0,
        ..StatVector::default()
    };
    assert_eq!(base.combine(&delta).magic_resistance, -3.0);
    assert_eq!(
        base.combine_with(&delta, MagicResistancePolicy::FloorAtZero)
            .magic_resistance,
        0.0
    );

    let mut floored = Character::new(CharacterKind::Mage, base)
        .with_policy(MagicResistancePolicy::FloorAtZero);
    floored
        .add_item(Item::new(ItemKind::Pole, delta))
        .unwrap();
    assert_eq!(floored.effective_stats().magic_resistance, 0.0);

    let mut unclamped = Character::new(CharacterKind::Mage, base);
    unclamped
        .add_item(Item::new(ItemKind::Pole, delta))
        .unwrap();
    assert_eq!(unclamped.effective_stats().magic_resistance, -3.0);
}

#[test]
fn second_unique_copy_only_adds_base_stats() {
    let base = StatVector {
        special_trigger_chance: 40.0,
        ..StatVector::with_hp(100.0)
    };
    let item_stats = StatVector {
        armor: 5.0,
        ..StatVector::default()
    };

    for kind in [ItemKind::EnchantedSword, ItemKind::MagicCauldron] {
        let mut single = Character::new(CharacterKind::Warrior, base);
        single.add_item(Item::new(kind, item_stats)).unwrap();

        let mut doubled = Character::new(CharacterKind::Warrior, base);
        doubled.add_item(Item::new(kind, item_stats)).unwrap();
        doubled.add_item(Item::new(kind, item_stats)).unwrap();

        let expected = single.effective_stats().combine(&item_stats);
        assert_eq!(doubled.effective_stats(), &expected, "{kind:?}");
    }
}

#[test]
fn fourth_item_fails_for_every_kind() {
    for character_kind in ALL_CHARACTER_KINDS {
        for item_kind in ALL_ITEM_KINDS {
            let mut fighter = character(character_kind, 0.0, 0.0);
            for _ in 0..3 {
                fighter
                    .add_item(Item::new(ItemKind::SolidRock, StatVector::default()))
                    .unwrap();
            }
            let before = *fighter.effective_stats();
            let err = fighter
                .add_item(Item::new(item_kind, StatVector::with_hp(99.0)))
                .unwrap_err();
            assert!(matches!(err, CombatError::CapacityExceeded { .. }));
            assert_eq!(fighter.effective_stats(), &before);
        }
    }
}

#[test]
fn effective_stats_are_recomputed_from_base_each_time() {
    let mut mage = character(CharacterKind::Mage, 0.0, 20.0);
    mage.add_item(Item::new(ItemKind::ShinyStaff, StatVector::default()))
        .unwrap();
    assert_eq!(mage.effective_stats().magic_power, 31.0);
    mage.add_item(Item::new(ItemKind::ShinyStaff, StatVector::default()))
        .unwrap();
    // Each staff scales off base magic power (20), not the boosted value.
    assert_eq!(mage.effective_stats().magic_power, 42.0);
}

#[test]
fn ninja_special_scenario_deals_exactly_55() {
    let mut ninja = character(CharacterKind::Ninja, 20.0, 10.0);
    let mut target = undefended(100.0);
    let mut decisions = ScriptedDecisions::new([true, false]);

    let record = play_turn(&mut ninja, &mut target, true, &mut decisions).unwrap();

    assert_eq!(record.attack, AttackKind::Special);
    assert_eq!(record.missed, Some(false));
    assert_eq!(record.damage_dealt, 55.0);
    assert_eq!(target.effective_stats().current_hp, 45.0);
    assert_eq!(decisions.requested(), &[0.0, 0.0]);
    assert!(record.description.starts_with("Ninja: A poisoned dagger shot"));
}

#[test]
fn ninja_special_clamps_target_at_zero() {
    let mut ninja = character(CharacterKind::Ninja, 20.0, 10.0);
    let mut target = undefended(30.0);
    let mut decisions = ScriptedDecisions::new([true, false]);

    play_turn(&mut ninja, &mut target, true, &mut decisions).unwrap();

    assert_eq!(target.effective_stats().current_hp, 0.0);
    assert!(target.is_defeated());
}

#[test]
fn warrior_special_heals_without_a_miss_draw() {
    let mut warrior = Character::new(
        CharacterKind::Warrior,
        StatVector {
            current_hp: 60.0,
            total_hp: 100.0,
            physical_power: 10.0,
            magic_power: 5.0,
            ..StatVector::default()
        },
    );
    let mut opponent = undefended(80.0);
    let opponent_before = opponent.clone();
    let mut decisions = ScriptedDecisions::new([true, true]);

    let record = play_turn(&mut warrior, &mut opponent, true, &mut decisions).unwrap();

    assert_eq!(decisions.requested().len(), 1);
    assert_eq!(record.missed, None);
    assert_eq!(record.damage_dealt, 0.0);
    approx_eq(record.self_heal, 72.5, 1e-12);
    approx_eq(warrior.effective_stats().current_hp, 132.5, 1e-12);
    approx_eq(warrior.effective_stats().total_hp, 172.5, 1e-12);
    assert_eq!(opponent, opponent_before);
}

#[test]
fn mage_special_is_mitigated_by_magic_resistance() {
    let mut mage = character(CharacterKind::Mage, 0.0, 32.0);
    let mut target = Character::new(
        CharacterKind::Ninja,
        StatVector {
            armor: 90.0,
            magic_resistance: 20.0,
            ..StatVector::with_hp(100.0)
        },
    );
    let mut decisions = ScriptedDecisions::new([true, false]);

    let record = play_turn(&mut mage, &mut target, true, &mut decisions).unwrap();

    // 1 + 1.25 * 32 = 41 magic, 20% resisted; miss roll uses magic resistance.
    assert_eq!(decisions.requested(), &[0.0, 2.0]);
    approx_eq(record.damage_dealt, 32.8, 1e-12);
    approx_eq(target.effective_stats().current_hp, 67.2, 1e-12);
}

#[test]
fn special_trigger_draw_uses_effective_chance() {
    let mut ninja = Character::new(
        CharacterKind::Ninja,
        StatVector {
            special_trigger_chance: 20.0,
            ..StatVector::with_hp(50.0)
        },
    );
    ninja
        .add_item(Item::new(ItemKind::EnchantedSword, StatVector::default()))
        .unwrap();
    let mut target = Character::new(
        CharacterKind::Mage,
        StatVector {
            armor: 40.0,
            ..StatVector::with_hp(50.0)
        },
    );
    let mut decisions = ScriptedDecisions::new([false, true]);

    let record = play_turn(&mut ninja, &mut target, true, &mut decisions).unwrap();

    assert_eq!(decisions.requested(), &[30.0, 4.0]);
    assert_eq!(record.attack, AttackKind::Basic);
    assert_eq!(record.missed, Some(true));
    assert_eq!(target.effective_stats().current_hp, 50.0);
}

#[test]
fn defeated_defender_is_not_replaced_inside_a_turn() {
    let mut ninja = character(CharacterKind::Ninja, 20.0, 10.0);
    let mut target = undefended(55.0);
    let mut decisions = ScriptedDecisions::new([true, false]);

    let record = play_turn(&mut ninja, &mut target, true, &mut decisions).unwrap();

    assert_eq!(record.defender_hp, 0.0);
    assert_eq!(record.defender, "Mage");
    assert!(target.is_defeated());
}

#[test]
fn replaying_a_turn_with_the_same_seed_is_identical() {
    let attacker = character(CharacterKind::Ninja, 25.0, 15.0);
    let defender = Character::new(
        CharacterKind::Warrior,
        StatVector {
            armor: 30.0,
            special_trigger_chance: 50.0,
            ..StatVector::with_hp(150.0)
        },
    );

    let run = || {
        let mut a = attacker.clone();
        let mut d = defender.clone();
        let mut decisions = SeededDecisions::new(1234);
        let records: Vec<_> = (0..20)
            .map(|turn| play_turn(&mut a, &mut d, turn % 2 == 0, &mut decisions).unwrap())
            .collect();
        (records, a, d, decisions.draws())
    };

    assert_eq!(run(), run());
}

#[test]
fn turn_record_names_the_attacking_side() {
    let mut yours = character(CharacterKind::Warrior, 0.0, 0.0);
    let mut theirs = character(CharacterKind::Mage, 0.0, 0.0);
    let mut decisions = SeededDecisions::new(9);

    let record = play_turn(&mut yours, &mut theirs, false, &mut decisions).unwrap();
    assert_eq!(record.attacker_side, Side::Opponent);
    assert_eq!(record.attacker, "Mage");
    assert_eq!(record.defender, "Warrior");
}

struct CountingDecisions {
    calls: usize,
}

impl DecisionSource for CountingDecisions {
    fn draw(&mut self, _probability: f64) -> bool {
        self.calls += 1;
        false
    }
}

#[test]
fn custom_decision_sources_plug_into_play_turn() {
    let mut yours = character(CharacterKind::Ninja, 0.0, 0.0);
    let mut theirs = character(CharacterKind::Mage, 0.0, 0.0);
    let mut decisions = CountingDecisions { calls: 0 };

    play_turn(&mut yours, &mut theirs, true, &mut decisions).unwrap();
    assert_eq!(decisions.calls, 2);
}

#[test]
fn negative_power_specials_deal_nothing_without_a_miss_draw() {
    for (kind, physical_power, magic_power) in [
        (CharacterKind::Mage, 0.0, -10.0),
        (CharacterKind::Ninja, -120.0, 0.0),
    ] {
        let mut attacker = Character::new(
            kind,
            StatVector {
                physical_power,
                magic_power,
                special_trigger_chance: 100.0,
                ..StatVector::with_hp(50.0)
            },
        );
        let mut target = Character::new(
            CharacterKind::Warrior,
            StatVector {
                armor: 30.0,
                magic_resistance: 30.0,
                ..StatVector::with_hp(40.0)
            },
        );
        let mut decisions = ScriptedDecisions::new([true, true]);

        let record = play_turn(&mut attacker, &mut target, true, &mut decisions).unwrap();

        assert_eq!(record.attack, AttackKind::Special, "{kind:?}");
        assert_eq!(record.missed, None);
        assert_eq!(record.damage_dealt, 0.0);
        assert_eq!(decisions.requested(), &[100.0]);
        assert_eq!(target.effective_stats().current_hp, 40.0);
    }
}
