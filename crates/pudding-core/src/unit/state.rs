use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

/// Estado de una ejecución de `Unit::run`.
///
/// Transiciones válidas:
/// - `Idle` -> `ResolvingInput` -> `Validating` -> `Processing` -> `WrappingOutput`
/// - `WrappingOutput` -> `Persisting` -> `Done`
/// - `WrappingOutput` -> `Done` (sin guardado de salida)
/// - `ResolvingInput` | `Validating` | `Processing` | `Persisting` -> `Failed`
///
/// `Done` y `Failed` son absorbentes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    ResolvingInput,
    Validating,
    Processing,
    WrappingOutput,
    Persisting,
    Done,
    Failed,
}

impl RunState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ResolvingInput => "resolving_input",
            Self::Validating => "validating",
            Self::Processing => "processing",
            Self::WrappingOutput => "wrapping_output",
            Self::Persisting => "persisting",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    pub fn can_transition_to(self, next: RunState) -> bool {
        use RunState::*;
        matches!((self, next),
                 (Idle, ResolvingInput)
                 | (ResolvingInput, Validating)
                 | (Validating, Processing)
                 | (Processing, WrappingOutput)
                 | (WrappingOutput, Persisting)
                 | (WrappingOutput, Done)
                 | (Persisting, Done)
                 | (ResolvingInput, Failed)
                 | (Validating, Failed)
                 | (Processing, Failed)
                 | (Persisting, Failed))
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Secuencia de estados visitados por una ejecución.
#[derive(Debug)]
pub(crate) struct StateTrace<'a> {
    unit: &'a str,
    states: Vec<RunState>,
}

impl<'a> StateTrace<'a> {
    pub(crate) fn new(unit: &'a str) -> Self {
        Self { unit,
               states: vec![RunState::Idle] }
    }

    pub(crate) fn current(&self) -> RunState {
        self.states.last().copied().unwrap_or(RunState::Idle)
    }

    pub(crate) fn enter(&mut self, next: RunState) {
        let current = self.current();
        debug_assert!(current.can_transition_to(next), "invalid transition {current} -> {next}");
        debug!("{}: {} -> {}", self.unit, current, next);
        self.states.push(next);
    }

    pub(crate) fn into_states(self) -> Vec<RunState> {
        self.states
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_is_reachable_only_from_working_states() {
        for from in [RunState::ResolvingInput, RunState::Validating, RunState::Processing, RunState::Persisting] {
            assert!(from.can_transition_to(RunState::Failed), "{from} -> failed");
        }
        for from in [RunState::Idle, RunState::WrappingOutput, RunState::Done, RunState::Failed] {
            assert!(!from.can_transition_to(RunState::Failed), "{from} -> failed");
        }
    }

    #[test]
    fn terminal_states_absorb() {
        for next in [RunState::Idle, RunState::ResolvingInput, RunState::Done] {
            assert!(!RunState::Done.can_transition_to(next));
            assert!(!RunState::Failed.can_transition_to(next));
        }
        assert!(RunState::Done.is_terminal() && RunState::Failed.is_terminal());
    }

    #[test]
    fn trace_starts_idle_and_records_order() {
        let mut trace = StateTrace::new("u");
        trace.enter(RunState::ResolvingInput);
        trace.enter(RunState::Failed);
        assert_eq!(trace.into_states(), vec![RunState::Idle, RunState::ResolvingInput, RunState::Failed]);
    }
}
