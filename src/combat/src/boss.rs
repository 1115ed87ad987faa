// src/combat/src/boss.rs

use strum::{Display, EnumIter};

use crate::enemy::EnemyAction;
use crate::rng::GameRng;

/// Health ratio below which every boss is enraged
pub const ENRAGE_THRESHOLD: f32 = 0.5;

/// Scenario bosses, one per scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum BossKind {
    /// Trail: heavy single hits
    #[strum(to_string = "Ogre King")]
    OgreKing,
    /// Forest: drains life with every bite
    #[strum(to_string = "Spider Queen")]
    SpiderQueen,
    /// Cave: grows stronger every turn
    #[strum(to_string = "Young Dragon")]
    YoungDragon,
    /// Ruins: drains life, escalates once wounded
    #[strum(to_string = "Lich Lord")]
    LichLord,
}

/// Counters a boss carries between its turns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BossState {
    pub turns_acted: u32,
    pub enraged_turns: u32,
}

impl BossKind {
    /// Decide this turn's attack.
    ///
    /// `attack` is the boss's base attack and `health_ratio` its current
    /// health fraction; `state` is advanced by one turn.
    pub fn act(
        self,
        name: &str,
        attack: u32,
        health_ratio: f32,
        state: &mut BossState,
        rng: &mut GameRng,
    ) -> EnemyAction {
        state.turns_acted += 1;
        let enraged = health_ratio < ENRAGE_THRESHOLD;
        if enraged {
            state.enraged_turns += 1;
        }
        let base = attack as f32;

        match self {
            BossKind::OgreKing => {
                let (mut damage, mut description) = if rng.chance(0.3) {
                    (base * 1.5, format!("{} prepares a CRUSHING BLOW!", name))
                } else {
                    (base, format!("{} swings its club.", name))
                };
                if enraged {
                    damage *= 1.3;
                    description.push_str(" It is enraged!");
                }
                EnemyAction::new(damage.round() as u32, description)
            }
            BossKind::SpiderQueen => {
                let mut damage = base;
                let mut description = format!("{} sinks its fangs in and drinks your blood.", name);
                if enraged {
                    damage *= 1.25;
                    description.push_str(" It is frenzied!");
                }
                EnemyAction::new(damage.round() as u32, description).with_lifesteal(0.5)
            }
            BossKind::YoungDragon => {
                // +2 for every turn already spent fighting
                let escalation = 2 * (state.turns_acted - 1);
                if state.turns_acted % 3 == 0 {
                    let damage = (base * 2.0).round() as u32 + escalation;
                    EnemyAction::new(damage, format!("{} unleashes FIRE BREATH!", name))
                } else {
                    EnemyAction::new(
                        attack + escalation,
                        format!("{} claws at you, growing fiercer.", name),
                    )
                }
            }
            BossKind::LichLord => {
                if enraged {
                    let damage = (base * 1.4).round() as u32 + 3 * state.enraged_turns;
                    EnemyAction::new(
                        damage,
                        format!("{} howls with necrotic fury and drains your life!", name),
                    )
                    .with_lifesteal(0.3)
                } else {
                    EnemyAction::new(attack, format!("{} drains your life force.", name))
                        .with_lifesteal(0.3)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dragon_escalates_and_breathes_fire() {
        let mut rng = GameRng::new(11);
        let mut state = BossState::default();
        let first = BossKind::YoungDragon.act("Dragon", 24, 1.0, &mut state, &mut rng);
        let second = BossKind::YoungDragon.act("Dragon", 24, 1.0, &mut state, &mut rng);
        let third = BossKind::YoungDragon.act("Dragon", 24, 1.0, &mut state, &mut rng);
        assert_eq!(first.damage, 24);
        assert_eq!(second.damage, 26);
        assert_eq!(third.damage, 48 + 4);
        assert!(third.description.contains("FIRE BREATH"));
    }

    #[test]
    fn spider_queen_always_drains() {
        let mut rng = GameRng::new(2);
        let mut state = BossState::default();
        let calm = BossKind::SpiderQueen.act("Queen", 20, 0.9, &mut state, &mut rng);
        assert_eq!(calm.damage, 20);
        assert_eq!(calm.lifesteal, 0.5);
        let frenzied = BossKind::SpiderQueen.act("Queen", 20, 0.4, &mut state, &mut rng);
        assert_eq!(frenzied.damage, 25);
    }

    #[test]
    fn lich_escalates_only_while_enraged() {
        let mut rng = GameRng::new(4);
        let mut state = BossState::default();
        let calm = BossKind::LichLord.act("Lich", 10, 0.8, &mut state, &mut rng);
        assert_eq!(calm.damage, 10);
        assert_eq!(state.enraged_turns, 0);
        let first = BossKind::LichLord.act("Lich", 10, 0.3, &mut state, &mut rng);
        let second = BossKind::LichLord.act("Lich", 10, 0.3, &mut state, &mut rng);
        assert_eq!(first.damage, 14 + 3);
        assert_eq!(second.damage, 14 + 6);
    }

    #[test]
    fn ogre_damage_stays_in_its_branches() {
        let mut rng = GameRng::new(99);
        let mut state = BossState::default();
        for _ in 0..100 {
            let calm = BossKind::OgreKing.act("Ogre", 20, 1.0, &mut state, &mut rng);
            assert!(calm.damage == 20 || calm.damage == 30);
            let angry = BossKind::OgreKing.act("Ogre", 20, 0.2, &mut state, &mut rng);
            assert!(angry.damage == 26 || angry.damage == 39);
        }
    }
}
