use std::fmt;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// User statistics as reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub hp: f64,
    #[serde(default)]
    pub max_health: f64,
    pub mp: f64,
    #[serde(rename = "maxMP", default)]
    pub max_mp: f64,
    pub gp: f64,
    pub exp: f64,
    #[serde(default)]
    pub to_next_level: f64,
    pub lvl: i64,
}

/// Integer view of [`UserStats`] used for display and deltas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatSnapshot {
    pub hp: i64,
    pub mp: i64,
    pub gp: i64,
    pub exp: i64,
    pub lvl: i64,
}

/// Round half away from zero
fn round(value: f64) -> i64 {
    value.round() as i64
}

impl UserStats {
    /// Health is rounded; mana, gold and experience are truncated.
    pub fn snapshot(&self) -> StatSnapshot {
        StatSnapshot {
            hp: round(self.hp),
            mp: self.mp.trunc() as i64,
            gp: self.gp.trunc() as i64,
            exp: self.exp.trunc() as i64,
            lvl: self.lvl,
        }
    }
}

/// Signed change in user statistics over one sync cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatDelta {
    pub health: i64,
    pub mana: i64,
    pub gold: i64,
    pub experience: i64,
    pub level: i64,
}

impl StatDelta {
    /// Field-wise `after - before`
    pub fn between(before: StatSnapshot, after: StatSnapshot) -> Self {
        StatDelta {
            health: after.hp - before.hp,
            mana: after.mp - before.mp,
            gold: after.gp - before.gp,
            experience: after.exp - before.exp,
            level: after.lvl - before.lvl,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == StatDelta::default()
    }

    /// Experience gained across a level change is not comparable, so it
    /// is reported as zero once the level moved.
    pub fn finalize(mut self) -> Self {
        if self.level != 0 {
            self.experience = 0;
        }
        self
    }
}

impl AddAssign for StatDelta {
    fn add_assign(&mut self, rhs: StatDelta) {
        self.health += rhs.health;
        self.mana += rhs.mana;
        self.gold += rhs.gold;
        self.experience += rhs.experience;
        self.level += rhs.level;
    }
}

impl fmt::Display for StatDelta {
    /// Non-zero fields as `lvl +1 hp -2 ...`; "no change" when empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("lvl", self.level),
            ("hp", self.health),
            ("exp", self.experience),
            ("mp", self.mana),
            ("gp", self.gold),
        ];
        let parts: Vec<String> = fields
            .iter()
            .filter(|(_, v)| *v != 0)
            .map(|(name, v)| format!("{name} {v:+}"))
            .collect();
        if parts.is_empty() {
            write!(f, "no change")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

/// Reward message returned alongside a scoring operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropEvent(pub String);

impl fmt::Display for DropEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Character attributes, filled in by the background refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AttributeStats {
    pub strength: i64,
    pub intelligence: i64,
    pub perception: i64,
    pub constitution: i64,
}

impl fmt::Display for AttributeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "STR: {} INT: {} PER: {} CON: {}",
            self.strength, self.intelligence, self.perception, self.constitution
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(hp: i64, gp: i64, mp: i64, exp: i64, lvl: i64) -> StatSnapshot {
        StatSnapshot { hp, mp, gp, exp, lvl }
    }

    #[test]
    fn snapshot_rounds_health_and_truncates_the_rest() {
        let stats = UserStats {
            hp: 47.5,
            mp: 10.9,
            gp: 12.99,
            exp: 30.7,
            lvl: 3,
            ..Default::default()
        };
        assert_eq!(stats.snapshot(), snap(48, 12, 10, 30, 3));

        let negative = UserStats {
            hp: -0.5,
            ..Default::default()
        };
        assert_eq!(negative.snapshot().hp, -1);
    }

    #[test]
    fn between_is_after_minus_before() {
        let before = snap(50, 10, 10, 25, 3);
        let after = snap(48, 12, 10, 30, 3);
        let delta = StatDelta::between(before, after).finalize();
        assert_eq!(
            delta,
            StatDelta {
                health: -2,
                gold: 2,
                mana: 0,
                experience: 5,
                level: 0
            }
        );
    }

    #[test]
    fn level_change_suppresses_experience() {
        let delta = StatDelta::between(snap(50, 10, 10, 95, 3), snap(50, 10, 10, 4, 4)).finalize();
        assert_eq!(delta.level, 1);
        assert_eq!(delta.experience, 0);
    }

    #[test]
    fn add_assign_accumulates() {
        let mut total = StatDelta::default();
        total += StatDelta {
            gold: 1,
            ..Default::default()
        };
        total += StatDelta {
            gold: 2,
            health: -1,
            ..Default::default()
        };
        assert_eq!(total.gold, 3);
        assert_eq!(total.health, -1);
        assert!(!total.is_zero());
        assert!(StatDelta::default().is_zero());
    }

    #[test]
    fn display_shows_signed_non_zero_fields() {
        let delta = StatDelta {
            health: -2,
            gold: 2,
            experience: 5,
            ..Default::default()
        };
        assert_eq!(delta.to_string(), "hp -2 exp +5 gp +2");
        assert_eq!(StatDelta::default().to_string(), "no change");
    }
}
