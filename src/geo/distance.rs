//! Great-circle distance models.
//!
//! Both models work on a sphere of the IUGG mean Earth radius and report
//! kilometres. Input is decimal degrees; coordinates outside `[-90, 90]` /
//! `[-180, 180]` are not rejected and give meaningless results.

use super::point::Point;

/// Mean Earth radius in kilometres (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Surface distance between two points.
///
/// Implementations must be pure, non-negative, exactly symmetric
/// (`distance(p, q) == distance(q, p)` bit for bit) and return `0.0` for
/// identical coordinates.
pub trait Metric: Send + Sync {
    /// Distance from `p` to `q` in kilometres.
    fn distance(&self, p: Point, q: Point) -> f64;
}

/// Haversine great-circle distance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Haversine;

impl Metric for Haversine {
    fn distance(&self, p: Point, q: Point) -> f64 {
        let lat1_rad = p.lat().to_radians();
        let lat2_rad = q.lat().to_radians();
        let delta_lat = (q.lat() - p.lat()).to_radians();
        let delta_lon = (q.lon() - p.lon()).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
        // a can drift past 1.0 for near-antipodal points
        let c = 2.0 * a.min(1.0).sqrt().asin();

        EARTH_RADIUS_KM * c
    }
}

/// Spherical great-circle distance in the `atan2` (Vincenty) form.
///
/// Well conditioned for both very short and antipodal separations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GreatCircle;

impl Metric for GreatCircle {
    fn distance(&self, p: Point, q: Point) -> f64 {
        // canonical argument order keeps the result bit-symmetric
        let (p, q) = if q < p { (q, p) } else { (p, q) };

        let lat1 = p.lat().to_radians();
        let lat2 = q.lat().to_radians();
        let delta_lon = (q.lon() - p.lon()).to_radians();

        let (sin_lat1, cos_lat1) = lat1.sin_cos();
        let (sin_lat2, cos_lat2) = lat2.sin_cos();
        let (sin_dlon, cos_dlon) = delta_lon.sin_cos();

        let y = ((cos_lat2 * sin_dlon).powi(2)
            + (cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_dlon).powi(2))
        .sqrt();
        let x = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_dlon;

        EARTH_RADIUS_KM * y.atan2(x)
    }
}

impl<M: Metric + ?Sized> Metric for &M {
    fn distance(&self, p: Point, q: Point) -> f64 {
        (**self).distance(p, q)
    }
}
