//! Achievements
//!
//! A fixed set, unlocked at most once each. The evaluators are pure
//! predicates over the numbers that changed; announcing an unlock is the
//! caller's job (see `GameState::unlock`).

use serde::{Deserialize, Serialize};

use super::state::ActiveEffects;

/// Stable achievement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstBlood,
    Survivor,
    Sharpshooter,
    PowerHungry,
    AcePilot,
}

impl AchievementId {
    /// Display order
    pub const ALL: [AchievementId; 5] = [
        AchievementId::FirstBlood,
        AchievementId::Survivor,
        AchievementId::Sharpshooter,
        AchievementId::PowerHungry,
        AchievementId::AcePilot,
    ];

    pub fn key(self) -> &'static str {
        match self {
            AchievementId::FirstBlood => "first_blood",
            AchievementId::Survivor => "survivor",
            AchievementId::Sharpshooter => "sharpshooter",
            AchievementId::PowerHungry => "power_hungry",
            AchievementId::AcePilot => "ace_pilot",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AchievementId::FirstBlood => "First Blood",
            AchievementId::Survivor => "Survivor",
            AchievementId::Sharpshooter => "Sharpshooter",
            AchievementId::PowerHungry => "Power Hungry",
            AchievementId::AcePilot => "Ace Pilot",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AchievementId::FirstBlood => "Shoot down your first enemy",
            AchievementId::Survivor => "Reach level 5",
            AchievementId::Sharpshooter => "Score 5000 points",
            AchievementId::PowerHungry => "Hold a shield and triple shot at once",
            AchievementId::AcePilot => "Score 15000 points",
        }
    }

    /// Icon tag for the presentation layer
    pub fn icon(self) -> &'static str {
        match self {
            AchievementId::FirstBlood => "Target",
            AchievementId::Survivor => "Shield",
            AchievementId::Sharpshooter => "Zap",
            AchievementId::PowerHungry => "BatteryCharging",
            AchievementId::AcePilot => "Trophy",
        }
    }
}

/// Score thresholds, checked whenever the score grows
const SCORE_ACHIEVEMENTS: [(u64, AchievementId); 3] = [
    (100, AchievementId::FirstBlood),
    (5000, AchievementId::Sharpshooter),
    (15000, AchievementId::AcePilot),
];

/// Level that unlocks `Survivor`
pub const SURVIVOR_LEVEL: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub unlocked: bool,
}

/// The full achievement set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievements {
    pub list: Vec<Achievement>,
}

impl Default for Achievements {
    fn default() -> Self {
        Self {
            list: AchievementId::ALL
                .iter()
                .map(|&id| Achievement {
                    id,
                    unlocked: false,
                })
                .collect(),
        }
    }
}

impl Achievements {
    /// Mark unlocked. Returns true only the first time.
    pub fn try_unlock(&mut self, id: AchievementId) -> bool {
        match self.list.iter_mut().find(|a| a.id == id) {
            Some(achievement) if !achievement.unlocked => {
                achievement.unlocked = true;
                log::info!("Achievement unlocked: {}", id.name());
                true
            }
            _ => false,
        }
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.list.iter().any(|a| a.id == id && a.unlocked)
    }

    pub fn unlocked_count(&self) -> usize {
        self.list.iter().filter(|a| a.unlocked).count()
    }

    /// Achievements a score qualifies for
    pub fn earned_by_score(score: u64) -> impl Iterator<Item = AchievementId> {
        SCORE_ACHIEVEMENTS
            .into_iter()
            .filter(move |&(threshold, _)| score >= threshold)
            .map(|(_, id)| id)
    }

    /// Achievement a level qualifies for
    pub fn earned_by_level(level: u32) -> Option<AchievementId> {
        (level >= SURVIVOR_LEVEL).then_some(AchievementId::Survivor)
    }

    /// Achievement the held power-ups qualify for
    pub fn earned_by_effects(effects: &ActiveEffects) -> Option<AchievementId> {
        effects.power_combo().then_some(AchievementId::PowerHungry)
    }
}
