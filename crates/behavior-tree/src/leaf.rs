//! Closure-backed leaf nodes.
//!
//! Most trees need a handful of one-off checks and actions. Wrapping a
//! closure avoids declaring a unit struct and impl for each of them.

use std::marker::PhantomData;

use crate::{Behavior, Status};

/// Read-only check: succeeds when the predicate holds.
pub struct Condition<F, C> {
    predicate: F,
    _ctx: PhantomData<fn(&C)>,
}

impl<F, C> Condition<F, C>
where
    F: Fn(&C) -> bool,
{
    pub fn new(predicate: F) -> Self {
        Self {
            predicate,
            _ctx: PhantomData,
        }
    }
}

impl<F, C> Behavior<C> for Condition<F, C>
where
    F: Fn(&C) -> bool + Send + Sync,
{
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from((self.predicate)(ctx))
    }
}

/// Mutating step that reports its own status.
pub struct Action<F, C> {
    run: F,
    _ctx: PhantomData<fn(&mut C)>,
}

impl<F, C> Action<F, C>
where
    F: Fn(&mut C) -> Status,
{
    pub fn new(run: F) -> Self {
        Self {
            run,
            _ctx: PhantomData,
        }
    }
}

impl<F, C> Behavior<C> for Action<F, C>
where
    F: Fn(&mut C) -> Status + Send + Sync,
{
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (self.run)(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_reads_context() {
        let even = Condition::new(|n: &i32| n % 2 == 0);
        assert!(even.tick(&mut 4).is_success());
        assert!(even.tick(&mut 3).is_failure());
    }

    #[test]
    fn action_mutates_context() {
        let bump = Action::new(|log: &mut Vec<u8>| {
            log.push(1);
            Status::Success
        });
        let mut log = Vec::new();
        assert!(bump.tick(&mut log).is_success());
        assert!(bump.tick(&mut log).is_success());
        assert_eq!(log, vec![1, 1]);
    }
}
