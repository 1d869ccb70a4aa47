//! Mathematical utilities

pub mod ray;
pub mod sphere;
pub mod normals;

pub use ray::Ray;
pub use sphere::{SphereSample, TangentFrame, angular_distance, sample_uniform_direction};
pub use normals::compute_vertex_normals;
