mod point;
mod subgraph;

pub use point::{FieldValue, Point, PointRow};
