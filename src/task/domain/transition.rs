//! Configurable status transition table.

use super::TaskStatus;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Decides which status moves a task may make.
///
/// Re-applying the current status is always permitted under either policy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Any status may move to any other status.
    #[default]
    FreeForm,
    /// Only the listed moves are permitted.
    Restricted {
        /// Permitted targets keyed by source status.
        allowed: BTreeMap<TaskStatus, BTreeSet<TaskStatus>>,
    },
}

impl TransitionPolicy {
    /// Forward-only workflow with a single rework edge from review.
    ///
    /// `todo → in-progress → review → done`, plus `review → in-progress`.
    #[must_use]
    pub fn strict_workflow() -> Self {
        let edges = [
            (TaskStatus::Todo, TaskStatus::InProgress),
            (TaskStatus::InProgress, TaskStatus::Review),
            (TaskStatus::Review, TaskStatus::Done),
            (TaskStatus::Review, TaskStatus::InProgress),
        ];
        let mut allowed: BTreeMap<TaskStatus, BTreeSet<TaskStatus>> = BTreeMap::new();
        for (from, to) in edges {
            allowed.entry(from).or_default().insert(to);
        }
        Self::Restricted { allowed }
    }

    /// Returns `true` when a task may move from `from` to `to`.
    #[must_use]
    pub fn permits(&self, from: TaskStatus, to: TaskStatus) -> bool {
        if from == to {
            return true;
        }
        match self {
            Self::FreeForm => true,
            Self::Restricted { allowed } => allowed
                .get(&from)
                .is_some_and(|targets| targets.contains(&to)),
        }
    }
}
