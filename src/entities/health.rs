//! Hit point pool shared by every combatant

/// Current and maximum hit points. `0 <= current <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    /// Full health pool
    pub fn full(max: i32) -> Self {
        Self::new(max, max)
    }

    pub fn new(current: i32, max: i32) -> Self {
        let max = max.max(0);
        Self {
            current: current.clamp(0, max),
            max,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Overwrite current hit points, clamped into range
    pub fn set_current(&mut self, value: i32) {
        self.current = value.clamp(0, self.max);
    }

    /// Returns the damage actually absorbed
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.set_current(self.current.saturating_sub(amount.max(0)));
        before - self.current
    }

    /// Returns the hit points actually restored
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.set_current(self.current.saturating_add(amount.max(0)));
        self.current - before
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_on_construction() {
        let h = Health::new(50, 30);
        assert_eq!(h.current(), 30);
        let h = Health::new(-4, 30);
        assert_eq!(h.current(), 0);
        assert!(h.is_dead());
    }

    #[test]
    fn test_damage_and_heal_clamp() {
        let mut h = Health::new(5, 30);
        assert_eq!(h.take_damage(8), 5);
        assert_eq!(h.current(), 0);
        assert_eq!(h.heal(100), 30);
        assert_eq!(h.current(), 30);
        assert_eq!(h.heal(3), 0);
    }
}
