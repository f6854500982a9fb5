//! Bearing and range between the storm eye and grid cells.
//! Spherical Earth, angles in degrees unless a name says otherwise.

use crate::coords::LatLon;

/// Initial great-circle bearing from `from` to `to`, in degrees within
/// (-180, 180], measured clockwise from north.
pub fn initial_bearing(from: LatLon, to: LatLon) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();
    let dlon = lon2 - lon1;

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    let bearing = y.atan2(x) % std::f64::consts::TAU;
    bearing.to_degrees()
}

/// Reduce any compass bearing into (-180, 180].
pub fn normalize_bearing(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Storm heading `chi` relative to the longitudinal direction, from a
/// bearing in (-180, 180].
///
/// The quadrant boundaries at -90°, 0° and 90° are kept exactly as published
/// (Werley & McCown, 2007); the last three arms reduce to one expression but
/// stay separate so each quadrant remains auditable.
#[allow(clippy::if_same_then_else)]
pub fn storm_heading(bearing_deg: f64) -> f64 {
    if bearing_deg < -90.0 {
        180.0 - bearing_deg
    } else if bearing_deg < 0.0 {
        90.0 - bearing_deg
    } else if bearing_deg > 90.0 {
        90.0 - bearing_deg
    } else {
        90.0 - bearing_deg
    }
}

/// Angle `phi` from the eye to a cell, measured from the longitudinal
/// direction, using a local flat-Earth approximation scaled by the cosine of
/// the mean latitude.
///
/// A cell coinciding with the eye has no direction; it reports 0.
pub fn bearing_from_eye(eye: LatLon, cell: LatLon) -> f64 {
    let dlat = cell.lat - eye.lat;
    let dlon = cell.lon - eye.lon;
    if dlat == 0.0 && dlon == 0.0 {
        return 0.0;
    }

    let mean_lat = ((cell.lat + eye.lat) / 2.0).to_radians();
    // dlon == 0 gives ±inf and atan maps it to ±90°.
    let phi = (dlat / dlon / mean_lat.cos()).atan().to_degrees();
    if dlon < 0.0 {
        phi + 180.0
    } else {
        phi
    }
}

/// Haversine great-circle distance in kilometres.
pub fn haversine_range_km(eye: LatLon, cell: LatLon, earth_radius_km: f64) -> f64 {
    let (lat1, lon1) = eye.to_radians();
    let (lat2, lon2) = cell.to_radians();

    let half_dlat = ((lat2 - lat1) / 2.0).sin();
    let half_dlon = ((lon2 - lon1) / 2.0).sin();
    let a = half_dlat * half_dlat + lat2.cos() * lat1.cos() * half_dlon * half_dlon;

    // Rounding can push `a` a hair above 1 for antipodal points.
    2.0 * earth_radius_km * a.sqrt().min(1.0).asin()
}

/// Cell bearing relative to storm motion: `theta = phi − chi + 90`.
#[inline]
pub fn relative_bearing(phi: f64, chi: f64) -> f64 {
    phi - chi + 90.0
}
