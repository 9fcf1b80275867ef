//! Force change feedback
//!
//! [`ForceChangeDetector`] compares each frame's force against the force at
//! the last reported change, not against the previous frame, and reports at
//! most one change per cooldown window. [`FeedbackBanner`] holds the text
//! shown for a reported change with its own expiry.
//!
//! Both are driven by simulation time passed in by the caller, so the
//! cooldown is a deadline checked once per tick rather than a timer
//! callback. A new event replaces the pending deadline; [`ForceChangeDetector::cancel`]
//! drops it on teardown.

use crate::physics::math::Scalar;
use core::time::Duration;

/// Minimum change from the last reported force that counts as a change
pub const CHANGE_THRESHOLD: Scalar = 0.05;

/// Window after a reported change during which no new change is reported
pub const COOLDOWN_DURATION: Duration = Duration::from_millis(1500);

/// How long the banner for a reported change stays visible
pub const BANNER_DURATION: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeDirection {
    Increased,
    Decreased,
}

impl ChangeDirection {
    pub fn message(self) -> &'static str {
        match self {
            ChangeDirection::Increased => "Force Increased ↑",
            ChangeDirection::Decreased => "Force Decreased ↓",
        }
    }
}

/// A reported change in force magnitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceChange {
    pub direction: ChangeDirection,
    /// Force at the previous report
    pub from: Scalar,
    pub to: Scalar,
    /// Simulation time of the report
    pub at: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cooldown {
    #[default]
    Idle,
    Active {
        deadline: Duration,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForceChangeDetector {
    last_force: Scalar,
    cooldown: Cooldown,
    threshold: Scalar,
    cooldown_duration: Duration,
}

impl ForceChangeDetector {
    /// Creates a detector seeded with the force at simulation start
    pub fn new(initial_force: Scalar) -> Self {
        Self::with_settings(initial_force, CHANGE_THRESHOLD, COOLDOWN_DURATION)
    }

    pub fn with_settings(
        initial_force: Scalar,
        threshold: Scalar,
        cooldown_duration: Duration,
    ) -> Self {
        Self {
            last_force: initial_force,
            cooldown: Cooldown::Idle,
            threshold,
            cooldown_duration,
        }
    }

    /// Force at the last reported change (or the seed)
    pub fn last_force(&self) -> Scalar {
        self.last_force
    }

    pub fn cooldown(&self) -> Cooldown {
        self.cooldown
    }

    pub fn is_cooling_down(&self, now: Duration) -> bool {
        matches!(self.cooldown, Cooldown::Active { deadline } if now < deadline)
    }

    /// Returns to idle once the deadline has been reached
    pub fn poll(&mut self, now: Duration) {
        if let Cooldown::Active { deadline } = self.cooldown {
            if now >= deadline {
                self.cooldown = Cooldown::Idle;
            }
        }
    }

    pub fn evaluate(&mut self, current_force: Scalar, now: Duration) -> Option<ForceChange> {
        self.poll(now);

        if self.is_cooling_down(now) {
            return None;
        }

        if !current_force.is_finite() {
            return None;
        }

        let delta = current_force - self.last_force;

        // Also rejects a NaN delta from a non-finite seed
        if !(delta.abs() > self.threshold) {
            return None;
        }

        let change = ForceChange {
            direction: if delta > 0.0 {
                ChangeDirection::Increased
            } else {
                ChangeDirection::Decreased
            },
            from: self.last_force,
            to: current_force,
            at: now,
        };

        self.last_force = current_force;
        self.cooldown = Cooldown::Active {
            deadline: now + self.cooldown_duration,
        };

        Some(change)
    }

    /// Drops any pending cooldown
    pub fn cancel(&mut self) {
        self.cooldown = Cooldown::Idle;
    }

    /// Re-seeds the reference force and drops any pending cooldown
    pub fn reseed(&mut self, force: Scalar) {
        self.last_force = force;
        self.cancel();
    }
}

/// Banner text for the most recent reported change
#[derive(Debug, Clone, PartialEq)]
pub struct BannerMessage {
    pub direction: ChangeDirection,
    pub text: String,
    pub expires_at: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackBanner {
    message: Option<BannerMessage>,
    display_duration: Duration,
}

impl Default for FeedbackBanner {
    fn default() -> Self {
        Self::new(BANNER_DURATION)
    }
}

impl FeedbackBanner {
    pub fn new(display_duration: Duration) -> Self {
        Self {
            message: None,
            display_duration,
        }
    }

    /// Shows the banner for `change`, replacing any message still visible
    pub fn show(&mut self, change: &ForceChange) {
        self.message = Some(BannerMessage {
            direction: change.direction,
            text: change.direction.message().to_string(),
            expires_at: change.at + self.display_duration,
        });
    }

    pub fn expire(&mut self, now: Duration) {
        if self
            .message
            .as_ref()
            .is_some_and(|message| now >= message.expires_at)
        {
            self.message = None;
        }
    }

    pub fn visible(&self, now: Duration) -> Option<&BannerMessage> {
        self.message
            .as_ref()
            .filter(|message| now < message.expires_at)
    }

    pub fn clear(&mut self) {
        self.message = None;
    }
}
