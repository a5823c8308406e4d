//! Geographic primitives: points and great-circle distance.

mod distance;
mod point;

pub use distance::{GreatCircle, Haversine, Metric, EARTH_RADIUS_KM};
pub use point::Point;
