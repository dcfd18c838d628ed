//! Minimal behavior trees for turn-based decision making.
//!
//! Every tick completes immediately: there is no `Running` state and no
//! delta time. A node either succeeds or fails within a single call.
//!
//! Trees are generic over a context type `C` that the caller owns. Contexts
//! usually borrow live game state (`&mut` rosters, an RNG handle), so every
//! boxed node carries a lifetime `'n` and the context need not be `'static`.
//!
//! - [`Behavior`]: the node trait
//! - [`Status`]: success or failure
//! - Composites: [`Sequence`], [`Selector`]
//! - Leaves: [`Condition`], [`Action`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod leaf;
pub mod status;

pub use behavior::{Behavior, Node};
pub use composite::{Selector, Sequence};
pub use leaf::{Action, Condition};
pub use status::Status;
