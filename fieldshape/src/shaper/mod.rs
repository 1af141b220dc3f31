//! Shaping pipeline and its configuration

mod options;
mod pipeline;

pub use options::{Condition, ShapeConfig, Transform, ValidatorChain};
pub use pipeline::Serializer;
