//! Simple decision maker for computer-controlled combatants
//!
//! Attack the nearest enemy in reach and in sight, otherwise close the distance,
//! otherwise wait.

use crate::battle::actions::{walkable_for, Action, ActionCommand, MoveAction};
use crate::battle::grid::BattleGrid;
use crate::battle::hex::HexCoord;
use crate::battle::pathfinding::find_path;
use crate::battle::roster::Roster;
use crate::battle::visibility::has_line_of_sight;
use crate::core::types::CombatantId;

/// Pick a command for `actor`. Always returns something the actor may queue.
pub fn choose_action(roster: &Roster, grid: &BattleGrid, actor: CombatantId) -> ActionCommand {
    let Some(me) = roster.get(actor) else {
        return ActionCommand::wait(actor);
    };
    if me.is_dead() {
        return ActionCommand::wait(actor);
    }

    let reach = me.weapon.as_ref().map_or(0, |w| w.reach);

    // Nearest first, weakest breaks ties
    let mut enemies: Vec<(CombatantId, HexCoord, u32, u32)> = roster
        .living(me.faction.opposing())
        .map(|(id, c)| {
            (
                id,
                c.position,
                me.position.distance(&c.position),
                c.hit_points.current(),
            )
        })
        .collect();
    enemies.sort_by_key(|&(_, _, distance, hp)| (distance, hp));

    if let Some(&(target, _, _, _)) = enemies.iter().find(|&&(_, pos, distance, _)| {
        distance <= reach && has_line_of_sight(me.position, pos, |h| grid.blocks_sight(h))
    }) {
        tracing::debug!("{} attacks {}", me.name, roster[target].name);
        return ActionCommand::attack(actor, target);
    }

    for &(target, pos, _, _) in &enemies {
        if let Some(step) = approach(roster, grid, actor, pos) {
            return ActionCommand::Move(step);
        }
        tracing::debug!("{} has no route to {}", me.name, roster[target].name);
    }

    ActionCommand::wait(actor)
}

/// Furthest legal hex along a path toward `target`, stopping short of it
fn approach(
    roster: &Roster,
    grid: &BattleGrid,
    actor: CombatantId,
    target: HexCoord,
) -> Option<MoveAction> {
    let me = &roster[actor];
    let walkable = walkable_for(roster, grid, actor);
    let path = find_path(me.position, target, |h| h == target || walkable(h));
    if path.len() < 3 {
        return None;
    }

    // path[0] is our own hex and the last entry is the target's
    let furthest = (me.speed as usize).min(path.len() - 2);
    (1..=furthest).rev().find_map(|i| {
        let step = MoveAction {
            actor,
            destination: path[i],
        };
        step.validate(roster, grid).ok().map(|_| step)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::classes::CombatClass;
    use crate::combat::combatant::Faction;

    fn place(roster: &mut Roster, class: CombatClass, faction: Faction, q: i32, r: i32) -> CombatantId {
        roster.add(class.build(format!("{:?}", class), faction).at(HexCoord::new(q, r)))
    }

    #[test]
    fn test_attacks_adjacent_enemy() {
        let mut roster = Roster::new();
        let orc = place(&mut roster, CombatClass::Orc, Faction::Enemy, 0, 0);
        let hero = place(&mut roster, CombatClass::Fighter, Faction::Player, 1, 0);

        assert_eq!(
            choose_action(&roster, &BattleGrid::new(5), orc),
            ActionCommand::attack(orc, hero)
        );
    }

    #[test]
    fn test_prefers_weakest_when_equally_close() {
        let mut roster = Roster::new();
        let orc = place(&mut roster, CombatClass::Orc, Faction::Enemy, 0, 0);
        place(&mut roster, CombatClass::Fighter, Faction::Player, 1, 0);
        let rogue = place(&mut roster, CombatClass::Rogue, Faction::Player, -1, 0);

        assert_eq!(
            choose_action(&roster, &BattleGrid::new(5), orc),
            ActionCommand::attack(orc, rogue)
        );
    }

    #[test]
    fn test_archer_shoots_at_range_with_clear_sight() {
        let mut roster = Roster::new();
        let archer = place(&mut roster, CombatClass::Archer, Faction::Player, -3, 0);
        let goblin = place(&mut roster, CombatClass::Goblin, Faction::Enemy, 3, 0);
        let mut grid = BattleGrid::new(5);

        assert_eq!(
            choose_action(&roster, &grid, archer),
            ActionCommand::attack(archer, goblin)
        );

        // A wall in between forces a move instead
        grid.add_obstacle(HexCoord::new(0, 0));
        assert!(matches!(
            choose_action(&roster, &grid, archer),
            ActionCommand::Move(_)
        ));
    }

    #[test]
    fn test_moves_toward_distant_enemy() {
        let mut roster = Roster::new();
        let hero = place(&mut roster, CombatClass::Fighter, Faction::Player, -4, 0);
        let goblin = place(&mut roster, CombatClass::Goblin, Faction::Enemy, 4, 0);
        let grid = BattleGrid::new(5);

        let ActionCommand::Move(step) = choose_action(&roster, &grid, hero) else {
            panic!("expected a move");
        };
        let before = HexCoord::new(-4, 0).distance(&roster[goblin].position);
        let after = step.destination.distance(&roster[goblin].position);
        assert_eq!(before - after, 3);
        assert!(step.validate(&roster, &grid).is_ok());
    }

    #[test]
    fn test_stops_next_to_enemy() {
        let mut roster = Roster::new();
        let hero = place(&mut roster, CombatClass::Fighter, Faction::Player, 0, 0);
        place(&mut roster, CombatClass::Goblin, Faction::Enemy, 2, 0);

        let ActionCommand::Move(step) = choose_action(&roster, &BattleGrid::new(5), hero) else {
            panic!("expected a move");
        };
        assert_eq!(step.destination.distance(&HexCoord::new(2, 0)), 1);
    }

    #[test]
    fn test_waits_without_enemies() {
        let mut roster = Roster::new();
        let hero = place(&mut roster, CombatClass::Fighter, Faction::Player, 0, 0);
        let goblin = place(&mut roster, CombatClass::Goblin, Faction::Enemy, 3, 0);
        roster[goblin].hit_points.set_current(0);

        assert_eq!(
            choose_action(&roster, &BattleGrid::new(5), hero),
            ActionCommand::wait(hero)
        );
    }

    #[test]
    fn test_waits_when_walled_in() {
        let mut roster = Roster::new();
        let hero = place(&mut roster, CombatClass::Fighter, Faction::Player, 0, 0);
        place(&mut roster, CombatClass::Goblin, Faction::Enemy, 4, 0);
        let mut grid = BattleGrid::new(5);
        for h in HexCoord::new(0, 0).neighbors() {
            grid.add_obstacle(h);
        }

        assert_eq!(choose_action(&roster, &grid, hero), ActionCommand::wait(hero));
    }
}
