//! Core behavior trait.
//!
//! Every node in a tree implements [`Behavior`] for some context type `C`.
//! The context is the blackboard: it carries whatever state the nodes read
//! and mutate, and it is owned by the caller rather than by the tree.

use crate::Status;

/// A node that can be ticked against a context.
///
/// Nodes are immutable once the tree is built; all state that changes from
/// one tick to the next lives in the context.
pub trait Behavior<C>: Send + Sync {
    /// Evaluates this node once.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The blackboard. Conditions only read it; actions may change
    ///   it (spend action points, move a unit, record what happened).
    ///
    /// # Returns
    ///
    /// - `Status::Success` when the condition held or the action was performed
    /// - `Status::Failure` otherwise
    fn tick(&self, ctx: &mut C) -> Status;
}

/// Boxed node that may borrow data for `'n`.
///
/// The lifetime lets a tree be built for a context that borrows live state,
/// such as `&mut` rosters that only exist for one enemy's turn.
pub type Node<'n, C> = Box<dyn Behavior<C> + 'n>;

/// Forwards to the boxed node, so composites can hold mixed child types.
impl<C> Behavior<C> for Node<'_, C> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}
