//! Display model shared between providers and the presentation layer.

mod group;
mod item;

pub use group::ItemGroup;
pub use item::{Item, ItemAction};
