use super::codes::BaseStat;

/// Six-stat snapshot of the actor the skills belong to.
///
/// Only needed when an effect scales a chance or bonus with a core stat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorStats {
    pub strength: i32,
    pub wisdom: i32,
    pub spirit: i32,
    pub vitality: i32,
    pub agility: i32,
    pub luck: i32,
}

impl ActorStats {
    pub fn new(
        strength: i32,
        wisdom: i32,
        spirit: i32,
        vitality: i32,
        agility: i32,
        luck: i32,
    ) -> Self {
        Self {
            strength,
            wisdom,
            spirit,
            vitality,
            agility,
            luck,
        }
    }

    pub fn get(&self, stat: BaseStat) -> i32 {
        match stat {
            BaseStat::Strength => self.strength,
            BaseStat::Wisdom => self.wisdom,
            BaseStat::Spirit => self.spirit,
            BaseStat::Vitality => self.vitality,
            BaseStat::Agility => self.agility,
            BaseStat::Luck => self.luck,
        }
    }
}
