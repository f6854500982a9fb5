use thiserror::Error;

/// Input-validation failures. The model either runs over the full grid or
/// fails with one of these before touching a cell.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("latitude {0}° is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("translation speed must be non-negative, got {0} kt")]
    NegativeTranslation(f64),

    #[error("radius of maximum wind must be positive, got {0} km")]
    NonPositiveRmax(f64),

    #[error("peak wind {peak_mps:.3} m/s does not exceed translation speed {translation_mps:.3} m/s")]
    NonPositiveVmax { peak_mps: f64, translation_mps: f64 },

    #[error("grid has no cells")]
    EmptyGrid,

    #[error("grid latitude and longitude arrays differ in length ({lats} vs {lons})")]
    MismatchedGrid { lats: usize, lons: usize },

    #[error("grid shape {width}x{height} does not hold {cells} cells")]
    ShapeMismatch { width: usize, height: usize, cells: usize },

    #[error("cell ({row}, {col}) is outside the {width}x{height} grid")]
    CellOutOfRange { row: usize, col: usize, width: usize, height: usize },

    #[error("a {width}x{height} grid exceeds the cell limit")]
    GridTooLarge { width: usize, height: usize },

    #[error("grid cell size must be positive, got {0}°")]
    InvalidCellSize(f64),

    #[error("bounds are inverted or empty: lon [{min_lon}, {max_lon}], lat [{min_lat}, {max_lat}]")]
    InvalidBounds { min_lon: f64, max_lon: f64, min_lat: f64, max_lat: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Reject NaN and infinities with the offending field name attached.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, ModelError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::NonFinite { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_values_pass_through() {
        assert_eq!(ensure_finite("x", 3.5), Ok(3.5));
    }

    #[test]
    fn nan_reports_field_name() {
        let err = ensure_finite("eye latitude", f64::NAN).unwrap_err();
        assert!(matches!(err, ModelError::NonFinite { field: "eye latitude", .. }));
        assert!(err.to_string().contains("eye latitude"));
    }
}
