pub mod geometry;
pub mod ids;

pub use geometry::BoundingBox;
pub use ids::{IdAllocator, IdSpaceExhausted, MAX_OBJECT_NUMBER, ObjectId};
