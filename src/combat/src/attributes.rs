// src/combat/src/attributes.rs

/// Numeric stat bundle shared by every combatant.
///
/// `health` stays within `0..=max_health` and `mana` within `0..=max_mana`
/// as long as mutation goes through the methods below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attributes {
    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub mana: u32,
    pub max_mana: u32,
}

impl Attributes {
    /// Starting values double as the maximums
    pub fn new(health: u32, attack: u32, defense: u32, mana: u32) -> Self {
        Self {
            health,
            max_health: health,
            attack,
            defense,
            mana,
            max_mana: mana,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Remove health directly, ignoring defense. Returns the health actually lost.
    pub fn lose_health(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.health);
        self.health -= lost;
        lost
    }

    /// Restore health up to the maximum. Returns the amount actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_health.saturating_sub(self.health));
        self.health += healed;
        healed
    }

    /// Restore mana up to the maximum. Returns the amount actually restored.
    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_mana.saturating_sub(self.mana));
        self.mana += restored;
        restored
    }

    /// Deduct mana if enough is available
    pub fn spend_mana(&mut self, cost: u32) -> bool {
        if self.mana >= cost {
            self.mana -= cost;
            true
        } else {
            false
        }
    }

    pub fn restore_full_health(&mut self) {
        self.health = self.max_health;
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }

    pub fn mana_ratio(&self) -> f32 {
        if self.max_mana == 0 {
            return 0.0;
        }
        self.mana as f32 / self.max_mana as f32
    }

    /// Pull current values back inside their maximums (used after loading)
    pub fn clamp(&mut self) {
        self.health = self.health.min(self.max_health);
        self.mana = self.mana.min(self.max_mana);
    }

    /// `[#####-----] 60/120 HP`
    pub fn health_bar(&self, width: usize) -> String {
        let max = self.max_health.max(1);
        let filled = (width as u64 * self.health as u64 / max as u64) as usize;
        format!(
            "[{}{}] {}/{} HP",
            "#".repeat(filled),
            "-".repeat(width.saturating_sub(filled)),
            self.health,
            self.max_health
        )
    }
}
