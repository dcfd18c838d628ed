//! Composite nodes.
//!
//! Composites own their children and decide the order in which they run.
//! [`Sequence`] behaves like a short-circuit AND and [`Selector`] like a
//! short-circuit OR; together they cover priority lists such as "strike if
//! possible, otherwise close the distance".

use crate::{Behavior, Node, Status};

/// Runs children left to right until one fails.
///
/// # Semantics
///
/// - A failing child stops the sequence, which then fails.
/// - A succeeding child hands over to the next one.
/// - The sequence succeeds only when every child has succeeded.
///
/// Typical use is a guard followed by the action it protects.
pub struct Sequence<'n, C> {
    children: Vec<Node<'n, C>>,
}

impl<'n, C> Sequence<'n, C> {
    /// Creates a sequence over `children`, ticked in the given order.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Node<'n, C>>) -> Self {
        assert!(!children.is_empty(), "Sequence must have at least one child");
        Self { children }
    }
}

impl<C> Behavior<C> for Sequence<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_failure() {
                return Status::Failure;
            }
        }
        Status::Success
    }
}

/// Runs children left to right until one succeeds.
///
/// # Semantics
///
/// - A succeeding child stops the selector, which then succeeds.
/// - A failing child hands over to the next one.
/// - The selector fails only when every child has failed.
///
/// Children are listed in priority order; the first that can act wins.
pub struct Selector<'n, C> {
    children: Vec<Node<'n, C>>,
}

impl<'n, C> Selector<'n, C> {
    /// Creates a selector over `children`, highest priority first.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Node<'n, C>>) -> Self {
        assert!(!children.is_empty(), "Selector must have at least one child");
        Self { children }
    }
}

impl<C> Behavior<C> for Selector<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_success() {
                return Status::Success;
            }
        }
        Status::Failure
    }
}
