//! Dice rolling
//!
//! Combat never touches a global RNG; callers hand in a `DiceRoller`.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of die rolls
pub trait DiceRoller {
    /// Roll one die with `sides` faces, returning 1..=sides
    fn roll_die(&mut self, sides: u32) -> u32;

    fn d20(&mut self) -> u32 {
        self.roll_die(20)
    }

    /// Roll `count` dice of `sides` faces and sum them
    fn roll_dice(&mut self, count: u32, sides: u32) -> u32 {
        (0..count).map(|_| self.roll_die(sides)).sum()
    }
}

/// Dice backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RngDice<R: Rng> {
    rng: R,
}

impl<R: Rng> RngDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDice<ChaCha8Rng> {
    /// Reproducible dice from a seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Dice seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> DiceRoller for RngDice<R> {
    fn roll_die(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        self.rng.gen_range(1..=sides)
    }
}

/// Replays a fixed list of die faces, in order
///
/// Panics when the script runs out or a face does not fit the die being rolled;
/// either means the test scripted the wrong number of rolls.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    faces: VecDeque<u32>,
}

impl ScriptedDice {
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
        }
    }

    /// Rolls not yet consumed
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl DiceRoller for ScriptedDice {
    fn roll_die(&mut self, sides: u32) -> u32 {
        let Some(face) = self.faces.pop_front() else {
            panic!("scripted dice exhausted rolling a d{sides}");
        };
        assert!(
            (1..=sides).contains(&face),
            "scripted face {face} does not fit a d{sides}"
        );
        face
    }
}

impl<D: DiceRoller + ?Sized> DiceRoller for &mut D {
    fn roll_die(&mut self, sides: u32) -> u32 {
        (**self).roll_die(sides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolls_within_die() {
        let mut dice = RngDice::seeded(42);
        for _ in 0..500 {
            let roll = dice.d20();
            assert!((1..=20).contains(&roll));
        }
    }

    #[test]
    fn test_roll_dice_range() {
        let mut dice = RngDice::seeded(42);
        for _ in 0..200 {
            let total = dice.roll_dice(2, 6);
            assert!((2..=12).contains(&total));
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = RngDice::seeded(7);
        let mut b = RngDice::seeded(7);
        let rolls_a: Vec<u32> = (0..20).map(|_| a.d20()).collect();
        let rolls_b: Vec<u32> = (0..20).map(|_| b.d20()).collect();
        assert_eq!(rolls_a, rolls_b);
    }

    #[test]
    fn test_scripted_replays_in_order() {
        let mut dice = ScriptedDice::new([20, 3, 4]);
        assert_eq!(dice.d20(), 20);
        assert_eq!(dice.roll_dice(2, 6), 7);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn test_scripted_exhausted_panics() {
        let mut dice = ScriptedDice::new([]);
        dice.d20();
    }

    #[test]
    fn test_mut_ref_is_a_roller() {
        fn take(mut dice: impl DiceRoller) -> u32 {
            dice.d20()
        }
        let mut dice = ScriptedDice::new([11, 12]);
        assert_eq!(take(&mut dice), 11);
        assert_eq!(dice.d20(), 12);
    }
}
