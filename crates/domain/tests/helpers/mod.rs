pub mod builders;

pub use builders::{uniform_tree, ZoneNodeBuilder};
