//! Submission lifecycle: idle -> submitting -> succeeded | failed -> idle.

use serde::{Deserialize, Serialize};

/// Outcome banner shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    FieldEdited,
    SubmitStarted,
    SubmitAccepted,
    SubmitFailed,
    /// The submitting future was dropped before a result arrived.
    SubmitAbandoned,
}

impl SubmitPhase {
    /// Returns `None` when `transition` is not allowed from this phase.
    pub fn next(self, transition: Transition) -> Option<SubmitPhase> {
        use SubmitPhase::{Failed, Idle, Submitting, Succeeded};
        use Transition::{
            FieldEdited, SubmitAbandoned, SubmitAccepted, SubmitFailed, SubmitStarted,
        };

        match (self, transition) {
            (Idle | Succeeded | Failed, FieldEdited) => Some(Idle),
            (Idle | Succeeded | Failed, SubmitStarted) => Some(Submitting),
            (Submitting, SubmitAccepted) => Some(Succeeded),
            (Submitting, SubmitFailed) => Some(Failed),
            (Submitting, SubmitAbandoned) => Some(Idle),
            _ => None,
        }
    }

    pub fn status(self) -> SubmissionStatus {
        match self {
            SubmitPhase::Idle | SubmitPhase::Submitting => SubmissionStatus::Idle,
            SubmitPhase::Succeeded => SubmissionStatus::Success,
            SubmitPhase::Failed => SubmissionStatus::Error,
        }
    }

    pub fn is_submitting(self) -> bool {
        self == SubmitPhase::Submitting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHASES: [SubmitPhase; 4] = [
        SubmitPhase::Idle,
        SubmitPhase::Submitting,
        SubmitPhase::Succeeded,
        SubmitPhase::Failed,
    ];

    #[test]
    fn edits_return_every_settled_phase_to_idle() {
        for phase in [SubmitPhase::Idle, SubmitPhase::Succeeded, SubmitPhase::Failed] {
            assert_eq!(phase.next(Transition::FieldEdited), Some(SubmitPhase::Idle));
        }
        assert_eq!(SubmitPhase::Submitting.next(Transition::FieldEdited), None);
    }

    #[test]
    fn only_one_submission_in_flight() {
        assert_eq!(SubmitPhase::Submitting.next(Transition::SubmitStarted), None);
        for phase in [SubmitPhase::Idle, SubmitPhase::Succeeded, SubmitPhase::Failed] {
            assert_eq!(
                phase.next(Transition::SubmitStarted),
                Some(SubmitPhase::Submitting)
            );
        }
    }

    #[test]
    fn results_only_land_while_submitting() {
        for phase in PHASES {
            let accepted = phase.next(Transition::SubmitAccepted);
            let failed = phase.next(Transition::SubmitFailed);
            let abandoned = phase.next(Transition::SubmitAbandoned);
            if phase.is_submitting() {
                assert_eq!(accepted, Some(SubmitPhase::Succeeded));
                assert_eq!(failed, Some(SubmitPhase::Failed));
                assert_eq!(abandoned, Some(SubmitPhase::Idle));
            } else {
                assert_eq!(accepted, None);
                assert_eq!(failed, None);
                assert_eq!(abandoned, None);
            }
        }
    }

    #[test]
    fn submitting_reads_as_idle() {
        assert_eq!(SubmitPhase::Submitting.status(), SubmissionStatus::Idle);
        assert_eq!(SubmitPhase::Succeeded.status(), SubmissionStatus::Success);
        assert_eq!(SubmitPhase::Failed.status(), SubmissionStatus::Error);
        assert_eq!(SubmitPhase::default().status(), SubmissionStatus::Idle);
    }
}
