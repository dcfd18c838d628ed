//! Status returned by behavior nodes.

/// The result of ticking a node.
///
/// # Turn-based Semantics
///
/// There is no `Running` state. A tick either finishes its work or refuses
/// it, so a whole decision fits inside one call:
/// - a condition answers immediately ("is the target adjacent?")
/// - an action either happens or does not ("step toward the target")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Condition met, or action performed.
    Success,
    /// Condition not met, or action refused (no action points, blocked step).
    Failure,
}

impl Status {
    /// Returns `true` for `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` for `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }
}

impl From<bool> for Status {
    #[inline]
    fn from(ok: bool) -> Self {
        if ok { Status::Success } else { Status::Failure }
    }
}

impl<T, E> From<Result<T, E>> for Status {
    /// `Ok` succeeds, `Err` fails. The error itself is dropped.
    #[inline]
    fn from(result: Result<T, E>) -> Self {
        Status::from(result.is_ok())
    }
}
