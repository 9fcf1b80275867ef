//! Guided tutorial state
//!
//! Four fixed steps walk through the law of gravitation. While the tutorial
//! is active, mass and radius edits from the controls are locked out, along
//! with the orbit and math-mode toggles.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LearningStep {
    pub title: &'static str,
    pub description: &'static str,
}

pub const LEARNING_STEPS: [LearningStep; 4] = [
    LearningStep {
        title: "Step 1: Variables",
        description: "First, let's identify the masses and distance involved.",
    },
    LearningStep {
        title: "Step 2: Formula",
        description: "We apply Newton's Law of Gravitation formula.",
    },
    LearningStep {
        title: "Step 3: Calculation",
        description: "Plug in the values to see the resulting force.",
    },
    LearningStep {
        title: "Step 4: Meaning",
        description: "This force pulls both bodies together equally.",
    },
];

/// Step from which the exact law replaces the proportionality
const FORMULA_STEP: usize = 1;
/// Step from which the substituted values are always shown
const CALCULATION_STEP: usize = 2;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LearningMode {
    enabled: bool,
    step: usize,
    math_mode: bool,
}

impl LearningMode {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn step_index(&self) -> usize {
        self.step
    }

    pub fn current_step(&self) -> &'static LearningStep {
        &LEARNING_STEPS[self.step]
    }

    /// Enters or leaves the tutorial, always starting over at the first step
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
        self.step = 0;
    }

    pub fn reset_step(&mut self) {
        self.step = 0;
    }

    /// Returns false when already at the last step
    pub fn next(&mut self) -> bool {
        if self.step + 1 < LEARNING_STEPS.len() {
            self.step += 1;
            true
        } else {
            false
        }
    }

    /// Returns false when already at the first step
    pub fn previous(&mut self) -> bool {
        if self.step > 0 {
            self.step -= 1;
            true
        } else {
            false
        }
    }

    pub fn toggle_math_mode(&mut self) {
        self.math_mode = !self.math_mode;
    }

    pub fn is_math_mode(&self) -> bool {
        self.math_mode
    }

    /// `F = G · (m₁ · m₂) / r²` instead of `F ∝ (m₁ · m₂) / r²`
    pub fn shows_exact_law(&self) -> bool {
        self.math_mode || (self.enabled && self.step >= FORMULA_STEP)
    }

    /// Substitution and result lines under the law
    pub fn shows_calculation(&self) -> bool {
        self.math_mode || (self.enabled && self.step >= CALCULATION_STEP)
    }

    pub fn inputs_locked(&self) -> bool {
        self.enabled
    }

    /// Slider rows are highlighted on the first step
    pub fn highlights_variables(&self) -> bool {
        self.enabled && self.step == 0
    }

    pub fn highlights_formula(&self) -> bool {
        self.enabled && self.step >= FORMULA_STEP
    }

    /// "2 / 4" style progress label
    pub fn progress_label(&self) -> String {
        format!("{} / {}", self.step + 1, LEARNING_STEPS.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_saturates() {
        let mut learning = LearningMode::default();
        learning.toggle();

        assert!(!learning.previous());
        assert_eq!(learning.step_index(), 0);

        assert!(learning.next());
        assert!(learning.next());
        assert!(learning.next());
        assert!(!learning.next());
        assert_eq!(learning.step_index(), 3);
        assert_eq!(learning.current_step().title, "Step 4: Meaning");
        assert_eq!(learning.progress_label(), "4 / 4");
    }

    #[test]
    fn test_toggle_resets_step() {
        let mut learning = LearningMode::default();
        learning.toggle();
        learning.next();
        learning.toggle();

        assert!(!learning.is_enabled());
        assert_eq!(learning.step_index(), 0);
        assert!(!learning.inputs_locked());
    }

    #[test]
    fn test_formula_visibility() {
        let mut learning = LearningMode::default();
        assert!(!learning.shows_exact_law());
        assert!(!learning.shows_calculation());

        learning.toggle_math_mode();
        assert!(learning.is_math_mode());
        assert!(learning.shows_exact_law());
        assert!(learning.shows_calculation());
        learning.toggle_math_mode();

        learning.toggle();
        assert!(learning.highlights_variables());
        assert!(!learning.shows_exact_law());
        assert!(!learning.shows_calculation());

        learning.next();
        assert!(learning.highlights_formula());
        assert!(learning.shows_exact_law(), "the highlighted step shows the law");
        assert!(!learning.shows_calculation());

        learning.next();
        assert!(learning.shows_calculation());
    }
}
