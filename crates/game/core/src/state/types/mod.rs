pub mod character;
pub mod common;
pub mod status;
pub mod unit;

pub use character::Character;
pub use common::{Position, Side, UnitId};
pub use status::{PsiAbility, PsiEffect, StatusCounters, StatusTick};
pub use unit::{Guard, StatSource, Unit};
