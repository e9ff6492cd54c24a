use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{OperationKind, Profile, TargetInstance};

/// Submission sequence number of a task within one run.
///
/// Assigned in profile × target order, so it doubles as the deterministic submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    #[inline]
    pub fn new(seq: u64) -> Self {
        Self(seq)
    }

    #[inline]
    pub fn seq(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unit of dispatch: one operation against one profile and, for per-target kinds, one instance.
///
/// A task is executed exactly once and yields exactly one [`crate::TaskResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub profile: Profile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetInstance>,
    pub kind: OperationKind,
}

impl Task {
    pub fn for_profile(id: TaskId, profile: Profile, kind: OperationKind) -> Self {
        Self {
            id,
            profile,
            target: None,
            kind,
        }
    }

    pub fn for_target(
        id: TaskId,
        profile: Profile,
        target: TargetInstance,
        kind: OperationKind,
    ) -> Self {
        Self {
            id,
            profile,
            target: Some(target),
            kind,
        }
    }

    /// `profile` or `profile/instance`, used as the prefix of report lines.
    pub fn scope(&self) -> String {
        match &self.target {
            Some(t) => format!("{}/{}", self.profile, t.id),
            None => self.profile.to_string(),
        }
    }
}
