//! Battle integration tests
//!
//! Full battles driven through the public scheduler API, with scripted dice where the
//! outcome has to be exact and seeded dice where only the end state matters.

use hexy_tactics::battle::{
    choose_action, Action, ActionCommand, BattleGrid, HexCoord, Roster, TurnPhase,
    TurnScheduler,
};
use hexy_tactics::combat::{
    AbilityScores, ArmorProfile, CombatClass, Combatant, DiceRoller, Faction, HitPoints,
    RngDice, ScriptedDice, WeaponProfile,
};
use hexy_tactics::core::{BattleConfig, CombatantId, TacticsError};

const HERO: CombatantId = CombatantId(0);
const FOE: CombatantId = CombatantId(1);

/// STR 16, DEX 10, unarmored (AC 10), longsword
fn hero(max_hp: u32) -> Combatant {
    Combatant::new(
        "Hero",
        Faction::Player,
        AbilityScores::new(16, 10, 10, 10, 10, 10),
        max_hp,
    )
    .with_weapon(WeaponProfile::longsword())
    .with_armor(ArmorProfile::unarmored())
    .at(HexCoord::new(0, 0))
}

fn goblin(max_hp: u32) -> Combatant {
    let mut goblin = CombatClass::Goblin
        .build("Goblin", Faction::Enemy)
        .at(HexCoord::new(1, 0));
    goblin.hit_points = HitPoints::new(max_hp);
    goblin
}

fn scheduler<D: DiceRoller>(combatants: Vec<Combatant>, dice: D) -> TurnScheduler<D> {
    TurnScheduler::new(
        combatants.into_iter().collect(),
        BattleGrid::new(5),
        &BattleConfig::default(),
        dice,
    )
}

/// Let the AI play both sides until the battle ends or `max_rounds` pass
fn play_out<D: DiceRoller>(scheduler: &mut TurnScheduler<D>, max_rounds: u32) {
    scheduler.start_battle().unwrap();
    while !scheduler.is_over() && scheduler.round() <= max_rounds {
        if scheduler.phase().awaits_command() {
            let actor = scheduler.active_combatant().unwrap();
            let command = choose_action(scheduler.roster(), scheduler.grid(), actor);
            scheduler.queue_action(command).unwrap();
        } else {
            scheduler.update();
        }
    }
}

#[test]
fn test_sturdy_hero_against_one_hp_goblin_wins() {
    for seed in [1, 7, 42, 1234] {
        let mut battle = scheduler(vec![hero(100), goblin(1)], RngDice::seeded(seed));
        play_out(&mut battle, 100);

        assert_eq!(battle.phase(), TurnPhase::Victory, "seed {}", seed);
        assert!(battle.roster()[FOE].is_dead());
        assert_eq!(battle.roster()[FOE].hit_points.current(), 0);
    }
}

#[test]
fn test_fragile_hero_against_sturdy_goblin_loses() {
    for seed in [1, 7, 42, 1234] {
        let mut battle = scheduler(vec![hero(1), goblin(100)], RngDice::seeded(seed));
        play_out(&mut battle, 100);

        assert_eq!(battle.phase(), TurnPhase::Defeat, "seed {}", seed);
        assert!(battle.roster()[HERO].is_dead());
    }
}

#[test]
fn test_first_hit_ends_battle() {
    // Initiative 15 vs 3 + 2; attack 10 + 5 vs AC 14; damage 1 + 3
    let mut battle = scheduler(vec![hero(100), goblin(1)], ScriptedDice::new([15, 3, 10, 1]));
    battle.start_battle().unwrap();
    assert_eq!(battle.active_combatant(), Some(HERO));

    battle.queue_action(ActionCommand::attack(HERO, FOE)).unwrap();
    assert_eq!(battle.update(), TurnPhase::Victory);

    let lines: Vec<&str> = battle.log().lines().collect();
    assert!(lines.contains(&"Goblin is slain!"));
    assert_eq!(battle.log().latest(), Some("Victory!"));
}

#[test]
fn test_second_command_rejected_without_mutation() {
    let mut battle = scheduler(vec![hero(20), goblin(7)], ScriptedDice::new([15, 3]));
    battle.start_battle().unwrap();
    battle.queue_action(ActionCommand::wait(HERO)).unwrap();

    let phase = battle.phase();
    let round = battle.round();
    let order = battle.turn_order();
    let log: Vec<String> = battle.log().lines().map(str::to_string).collect();

    let err = battle
        .queue_action(ActionCommand::attack(HERO, FOE))
        .unwrap_err();
    assert!(matches!(err, TacticsError::ActionAlreadyPending));

    assert_eq!(battle.phase(), phase);
    assert_eq!(battle.round(), round);
    assert_eq!(battle.turn_order(), order);
    assert_eq!(battle.pending(), Some(&ActionCommand::wait(HERO)));
    assert_eq!(
        battle.log().lines().map(str::to_string).collect::<Vec<_>>(),
        log
    );
}

#[test]
fn test_full_round_advances_round_once() {
    let mut roster = Roster::new();
    roster.add(CombatClass::Fighter.build("Aldric", Faction::Player).at(HexCoord::new(-3, 0)));
    roster.add(CombatClass::Archer.build("Wren", Faction::Player).at(HexCoord::new(-3, 1)));
    roster.add(CombatClass::Goblin.build("Snik", Faction::Enemy).at(HexCoord::new(3, 0)));
    roster.add(CombatClass::Orc.build("Grosh", Faction::Enemy).at(HexCoord::new(3, -1)));

    let mut battle = TurnScheduler::new(
        roster,
        BattleGrid::new(5),
        &BattleConfig::default(),
        RngDice::seeded(42),
    );
    battle.start_battle().unwrap();
    assert_eq!(battle.round(), 1);

    for turn in 0..4 {
        assert_eq!(battle.round(), 1);
        assert_eq!(battle.turn_order().iter().filter(|e| e.has_acted).count(), turn);
        let actor = battle.active_combatant().unwrap();
        battle.queue_action(ActionCommand::wait(actor)).unwrap();
        battle.update();
    }

    assert_eq!(battle.round(), 2);
    assert!(battle.turn_order().iter().all(|e| !e.has_acted));
}

#[test]
fn test_turn_order_is_fixed_for_the_battle() {
    let mut battle = scheduler(vec![hero(20), goblin(7)], RngDice::seeded(3));
    battle.start_battle().unwrap();
    let first = battle.order().to_vec();

    for _ in 0..6 {
        battle.advance_turn().unwrap();
    }

    assert_eq!(battle.round(), 4);
    assert_eq!(battle.order(), first.as_slice());
}

#[test]
fn test_wait_and_attack_validation() {
    let roster: Roster = vec![hero(20), goblin(7)].into_iter().collect();
    let grid = BattleGrid::new(5);

    let wait = ActionCommand::wait(HERO);
    assert!(wait.validate(&roster, &grid).is_ok());
    assert!(wait.description(&roster).contains("Hero"));

    assert!(ActionCommand::attack(HERO, FOE).validate(&roster, &grid).is_ok());
    assert!(matches!(
        ActionCommand::attack(HERO, HERO).validate(&roster, &grid),
        Err(TacticsError::SelfAttack(_))
    ));

    let mut dead_foe = roster.clone();
    dead_foe[FOE].hit_points.set_current(0);
    assert!(matches!(
        ActionCommand::attack(HERO, FOE).validate(&dead_foe, &grid),
        Err(TacticsError::TargetDead(_))
    ));
    assert!(matches!(
        ActionCommand::attack(FOE, HERO).validate(&dead_foe, &grid),
        Err(TacticsError::AttackerDead(_))
    ));
}

#[test]
fn test_config_from_toml_sizes_the_log() {
    let config = BattleConfig::from_toml_str("combat_log_capacity = 2\ngrid_radius = 4\n").unwrap();
    let mut battle = TurnScheduler::new(
        vec![hero(20), goblin(7)].into_iter().collect(),
        BattleGrid::new(config.grid_radius),
        &config,
        ScriptedDice::new([15, 3]),
    );
    battle.start_battle().unwrap();
    for _ in 0..6 {
        battle.advance_turn().unwrap();
    }

    assert_eq!(battle.log().capacity(), 2);
    assert_eq!(battle.log().len(), 2);
}

#[test]
fn test_reset_replays_the_same_battle() {
    let mut battle = scheduler(vec![hero(100), goblin(1)], RngDice::seeded(5));
    play_out(&mut battle, 100);
    assert!(battle.is_over());

    battle.reset();
    assert_eq!(battle.phase(), TurnPhase::BattleStart);
    assert!(battle.roster()[FOE].is_alive());

    play_out(&mut battle, 100);
    assert_eq!(battle.phase(), TurnPhase::Victory);
}
