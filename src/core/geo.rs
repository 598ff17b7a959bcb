//! Geo helpers for the zip-radius restaurant search.
//!
//! Distances are measured on a sphere with Earth's mean radius in miles, the
//! same convention as a `$centerSphere` query: a radius in miles becomes an
//! angular radius by dividing by the Earth radius.

use std::collections::HashMap;

/// Earth's mean radius in miles
pub const EARTH_RADIUS_MILES: f64 = 3963.2;

/// Fixed search radius around a zip code centre, in miles
pub const SEARCH_RADIUS_MILES: f64 = 10.0;

/// Static zip code → (latitude, longitude) table.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    entries: HashMap<String, (f64, f64)>,
}

impl Gazetteer {
    /// Looks up the centre of a zip code as (latitude, longitude).
    #[must_use]
    pub fn resolve(&self, zip: &str) -> Option<(f64, f64)> {
        self.entries.get(zip.trim()).copied()
    }

    /// Number of known zip codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, (f64, f64))> for Gazetteer {
    fn from_iter<I: IntoIterator<Item = (String, (f64, f64))>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Whether `zip` is a five digit US zip code.
#[must_use]
pub fn is_well_formed_zip(zip: &str) -> bool {
    zip.len() == 5 && zip.bytes().all(|b| b.is_ascii_digit())
}

/// Converts a distance in miles to an angle in radians on the Earth sphere.
#[must_use]
pub fn miles_to_radians(miles: f64) -> f64 {
    miles / EARTH_RADIUS_MILES
}

/// Central angle in radians between two (latitude, longitude) points, via haversine.
#[must_use]
pub fn central_angle(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lat1, lng1) = (a.0.to_radians(), a.1.to_radians());
    let (lat2, lng2) = (b.0.to_radians(), b.1.to_radians());
    let dlat = lat2 - lat1;
    let dlng = lng2 - lng1;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * h.sqrt().min(1.0).asin()
}

/// Great-circle distance in miles between two (latitude, longitude) points.
#[must_use]
pub fn distance_miles(a: (f64, f64), b: (f64, f64)) -> f64 {
    central_angle(a, b) * EARTH_RADIUS_MILES
}

/// Spherical within-radius-of-centre predicate; the boundary is inclusive.
#[must_use]
pub fn within_radius(center: (f64, f64), point: (f64, f64), radius_miles: f64) -> bool {
    central_angle(center, point) <= miles_to_radians(radius_miles)
}

/// Latitude/longitude box that contains every point within a radius of a centre.
///
/// Used to narrow the candidate set in the store before the exact predicate runs.
/// A box that crosses the ±180° meridian is split into two longitude ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    /// Southern edge in degrees
    pub min_lat: f64,
    /// Northern edge in degrees
    pub max_lat: f64,
    /// Disjoint `(min_lng, max_lng)` ranges, each within [-180, 180]
    pub lng_ranges: Vec<(f64, f64)>,
}

impl BoundingBox {
    /// Whether a (latitude, longitude) point falls inside the box.
    #[must_use]
    pub fn contains(&self, point: (f64, f64)) -> bool {
        let (lat, lng) = point;
        (self.min_lat..=self.max_lat).contains(&lat)
            && self
                .lng_ranges
                .iter()
                .any(|&(min, max)| (min..=max).contains(&lng))
    }
}

/// Builds the [`BoundingBox`] around `center` (latitude, longitude).
#[must_use]
pub fn bounding_box(center: (f64, f64), radius_miles: f64) -> BoundingBox {
    // small margin so floating error at the box edge never drops a point
    let margin = 1e-9;
    let angular = miles_to_radians(radius_miles).to_degrees();
    let (lat, lng) = center;
    let min_lat = (lat - angular - margin).max(-90.0);
    let max_lat = (lat + angular + margin).min(90.0);

    // near the poles the longitude span covers the whole circle
    let widest = min_lat.abs().max(max_lat.abs()).to_radians().cos();
    if widest <= f64::EPSILON || angular / widest >= 180.0 {
        return BoundingBox {
            min_lat,
            max_lat,
            lng_ranges: vec![(-180.0, 180.0)],
        };
    }

    let dlng = angular / widest + margin;
    let (west, east) = (lng - dlng, lng + dlng);
    let lng_ranges = if west < -180.0 {
        vec![(-180.0, east), (west + 360.0, 180.0)]
    } else if east > 180.0 {
        vec![(west, 180.0), (-180.0, east - 360.0)]
    } else {
        vec![(west, east)]
    };

    BoundingBox {
        min_lat,
        max_lat,
        lng_ranges,
    }
}
