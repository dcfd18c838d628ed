//! Shorthand constructors returning boxed nodes.
//!
//! Trees read top-down when written with these helpers:
//! `selector(vec![sequence(vec![condition(..), action(..)]), ..])` instead of
//! nesting `Box::new(Selector::new(vec![Box::new(..)]))` by hand.

use crate::{Action, Condition, Node, Selector, Sequence, Status};

/// Boxed [`Sequence`] over `children`.
#[inline]
pub fn sequence<'n, C: 'n>(children: Vec<Node<'n, C>>) -> Node<'n, C> {
    Box::new(Sequence::new(children))
}

/// Boxed [`Selector`] over `children`.
#[inline]
pub fn selector<'n, C: 'n>(children: Vec<Node<'n, C>>) -> Node<'n, C> {
    Box::new(Selector::new(children))
}

/// Boxed [`Condition`] from a read-only predicate.
///
/// Plain `fn` items work as well as closures, which keeps named checks
/// reusable outside the tree.
#[inline]
pub fn condition<'n, C: 'n, F>(predicate: F) -> Node<'n, C>
where
    F: Fn(&C) -> bool + Send + Sync + 'n,
{
    Box::new(Condition::new(predicate))
}

/// Boxed [`Action`] from a function that mutates the context and reports
/// whether it did anything.
#[inline]
pub fn action<'n, C: 'n, F>(run: F) -> Node<'n, C>
where
    F: Fn(&mut C) -> Status + Send + Sync + 'n,
{
    Box::new(Action::new(run))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Behavior;

    struct Scratch {
        hits: u32,
        budget: u32,
    }

    #[test]
    fn guarded_action_runs_until_budget_is_spent() {
        let tree = selector(vec![
            sequence(vec![
                condition(|ctx: &Scratch| ctx.budget > 0),
                action(|ctx: &mut Scratch| {
                    ctx.hits += 1;
                    ctx.budget -= 1;
                    Status::Success
                }),
            ]),
            action(|_: &mut Scratch| Status::Failure),
        ]);

        let mut ctx = Scratch { hits: 0, budget: 2 };
        while tree.tick(&mut ctx).is_success() {}

        assert_eq!(ctx.hits, 2);
        assert_eq!(ctx.budget, 0);
    }
}
