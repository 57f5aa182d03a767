use std::collections::BTreeMap;
use thiserror::Error;

use crate::registry::FieldRegistry;
use crate::state::SelectionState;
use crate::validation::{self, ErrorKind, Field};

/// One screen of the wizard with the fields that gate leaving it forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    pub index: usize,
    pub id: &'static str,
    pub required_fields: &'static [Field],
}

/// The five wizard steps, in order. The summary step has no gating fields.
pub const STEPS: &[StepDefinition] = &[
    StepDefinition {
        index: 0,
        id: "category",
        required_fields: &[Field::ServiceCategory],
    },
    StepDefinition {
        index: 1,
        id: "services",
        required_fields: &[Field::SelectedServices],
    },
    StepDefinition {
        index: 2,
        id: "details",
        required_fields: &[Field::Budget, Field::Timeline, Field::AdditionalInfo],
    },
    StepDefinition {
        index: 3,
        id: "contact",
        required_fields: &[Field::Name, Field::Email, Field::Phone],
    },
    StepDefinition {
        index: 4,
        id: "summary",
        required_fields: &[],
    },
];

/// Forward navigation was blocked by the active step's fields. A normal,
/// expected outcome; the failing fields are surfaced inline by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("step {step} blocked by {} invalid field(s)", .errors.len())]
pub struct ValidationFailure {
    pub step: usize,
    pub errors: BTreeMap<Field, ErrorKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot jump forward from step {current} to step {target}")]
pub struct JumpRejected {
    pub current: usize,
    pub target: usize,
}

/// Linear state machine over the ordered step list. Forward movement is
/// gated by the active step's validation; backward movement never is.
#[derive(Debug, Clone, Default)]
pub struct StepSequencer {
    current: usize,
}

impl StepSequencer {
    pub fn new() -> Self {
        StepSequencer { current: 0 }
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn active(&self) -> &'static StepDefinition {
        &STEPS[self.current]
    }

    pub fn is_last(&self) -> bool {
        self.current == STEPS.len() - 1
    }

    /// Advances one step if the active step's required fields validate,
    /// clamped at the summary step. On failure the index is unchanged and
    /// the failing fields come back as data. Never mutates the state.
    pub fn go_next(
        &mut self,
        state: &SelectionState,
        registry: &FieldRegistry,
    ) -> Result<usize, ValidationFailure> {
        let errors = validation::validate(STEPS[self.current].required_fields, state, registry);
        if !errors.is_empty() {
            log::debug!("step {} blocked: {} invalid field(s)", self.current, errors.len());
            return Err(ValidationFailure { step: self.current, errors });
        }
        self.current = (self.current + 1).min(STEPS.len() - 1);
        Ok(self.current)
    }

    /// Backward movement is always permitted, clamped at the first step.
    pub fn go_previous(&mut self) -> usize {
        self.current = self.current.saturating_sub(1);
        self.current
    }

    /// Jumps back to an already-completed step. Forward jumps are rejected
    /// so the gating invariant holds.
    pub fn jump_to(&mut self, target: usize) -> Result<usize, JumpRejected> {
        if target >= self.current {
            return Err(JumpRejected { current: self.current, target });
        }
        self.current = target;
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ServiceCategory;

    fn filled_state() -> SelectionState {
        let mut state = SelectionState::new();
        state.set_category(ServiceCategory::Software);
        state.toggle_service("web-development");
        state.set_budget("5k-10k");
        state.set_timeline("asap");
        state.set_name("Ada Lovelace");
        state.set_email("ada@example.com");
        state.set_phone("5551234567");
        state
    }

    #[test]
    fn test_next_succeeds_iff_step_fields_pass() {
        let registry = FieldRegistry::new();
        let mut sequencer = StepSequencer::new();

        let empty = SelectionState::new();
        let failure = sequencer.go_next(&empty, &registry).unwrap_err();
        assert_eq!(sequencer.current_step(), 0);
        assert_eq!(failure.step, 0);
        assert_eq!(failure.errors.get(&Field::ServiceCategory), Some(&ErrorKind::Required));

        let state = filled_state();
        assert_eq!(sequencer.go_next(&state, &registry), Ok(1));
    }

    #[test]
    fn test_next_does_not_mutate_state() {
        let registry = FieldRegistry::new();
        let mut sequencer = StepSequencer::new();

        let empty = SelectionState::new();
        let before = empty.clone();
        let _ = sequencer.go_next(&empty, &registry);
        assert_eq!(empty, before);

        let state = filled_state();
        let before = state.clone();
        let _ = sequencer.go_next(&state, &registry);
        assert_eq!(state, before);
    }

    #[test]
    fn test_walks_all_steps_with_valid_state() {
        let registry = FieldRegistry::new();
        let state = filled_state();
        let mut sequencer = StepSequencer::new();
        for expected in 1..STEPS.len() {
            assert_eq!(sequencer.go_next(&state, &registry), Ok(expected));
        }
        assert!(sequencer.is_last());
    }

    #[test]
    fn test_next_is_idempotent_at_summary() {
        let registry = FieldRegistry::new();
        let state = filled_state();
        let mut sequencer = StepSequencer::new();
        while !sequencer.is_last() {
            sequencer.go_next(&state, &registry).unwrap();
        }
        assert_eq!(sequencer.go_next(&state, &registry), Ok(4));
        assert_eq!(sequencer.go_next(&state, &registry), Ok(4));
    }

    #[test]
    fn test_previous_never_validates_and_clamps_at_zero() {
        let mut sequencer = StepSequencer::new();
        assert_eq!(sequencer.go_previous(), 0);

        let registry = FieldRegistry::new();
        let mut state = filled_state();
        sequencer.go_next(&state, &registry).unwrap();
        sequencer.go_next(&state, &registry).unwrap();

        // invalidate the current step, going back must still work
        state.set_category(ServiceCategory::Agency);
        assert_eq!(sequencer.go_previous(), 1);
        assert_eq!(sequencer.go_previous(), 0);
        assert_eq!(sequencer.go_previous(), 0);
    }

    #[test]
    fn test_jump_only_backwards() {
        let registry = FieldRegistry::new();
        let state = filled_state();
        let mut sequencer = StepSequencer::new();
        sequencer.go_next(&state, &registry).unwrap();
        sequencer.go_next(&state, &registry).unwrap();

        assert_eq!(sequencer.jump_to(0), Ok(0));

        let mut sequencer = StepSequencer::new();
        assert_eq!(
            sequencer.jump_to(3),
            Err(JumpRejected { current: 0, target: 3 })
        );
        // jumping to the current step is not a backward jump
        assert!(sequencer.jump_to(0).is_err());
    }
}
