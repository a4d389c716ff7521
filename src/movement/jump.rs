//! Jump re-arm countdown.
//!
//! A jump starts a cooldown. Until it elapses the actor can neither jump
//! again nor snap back onto a slope, which stops the slope logic from
//! cancelling the take-off.

/// Countdown gating jumps.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct JumpCooldown {
    remaining: Option<f32>,
}

impl JumpCooldown {
    /// Whether a jump may start now.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.remaining.is_none()
    }

    /// Seconds left before the next jump is allowed.
    #[must_use]
    pub fn remaining(&self) -> f32 {
        self.remaining.unwrap_or(0.0)
    }

    /// Starts a cooldown of `seconds`.
    pub fn start(&mut self, seconds: f32) {
        self.remaining = Some(seconds);
    }

    /// Advances the countdown by `dt`; returns `true` on the tick that
    /// re-arms the jump.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(left) = self.remaining else {
            return false;
        };
        let next = left - dt;
        if next <= 0.0 {
            self.remaining = None;
            true
        } else {
            self.remaining = Some(next);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_cooldown_is_ready() {
        let cooldown = JumpCooldown::default();
        assert!(cooldown.is_ready());
        assert_eq!(cooldown.remaining(), 0.0);
    }

    #[test]
    fn rearms_only_after_full_duration() {
        let mut cooldown = JumpCooldown::default();
        cooldown.start(0.5);
        assert!(!cooldown.is_ready());
        assert!((cooldown.remaining() - 0.5).abs() < 1e-6);
        assert!(!cooldown.tick(0.2));
        assert!(!cooldown.tick(0.2));
        assert!(!cooldown.is_ready());
        assert!((cooldown.remaining() - 0.1).abs() < 1e-6);
        assert!(cooldown.tick(0.2));
        assert!(cooldown.is_ready());
        assert_eq!(cooldown.remaining(), 0.0);
        assert!(!cooldown.tick(0.2), "re-arm fires once");
    }

    #[test]
    fn zero_cooldown_rearms_on_next_tick() {
        let mut cooldown = JumpCooldown::default();
        cooldown.start(0.0);
        assert!(!cooldown.is_ready());
        assert!(cooldown.tick(0.0));
    }
}
