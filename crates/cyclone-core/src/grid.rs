use serde::{Deserialize, Serialize};

use crate::constants::MAX_GRID_CELLS;
use crate::coords::LatLon;
use crate::error::{ensure_finite, ModelError};

/// Geographic bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

/// Per-cell coordinates of the evaluation grid, row-major: rows step in
/// latitude, columns in longitude, linear index `row * width + col`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
    pub width: usize,
    pub height: usize,
}

impl GridSpec {
    /// Wrap caller-built coordinate arrays after checking they describe a
    /// non-empty `width × height` grid.
    pub fn new(lats: Vec<f64>, lons: Vec<f64>, width: usize, height: usize) -> Result<Self, ModelError> {
        let grid = Self { lats, lons, width, height };
        grid.validate()?;
        Ok(grid)
    }

    /// Regular grid of cell centres covering `bounds` at `cell_size_deg`.
    /// Row 0 sits at `min_lat`, column 0 at `min_lon`.
    pub fn from_bounds(bounds: Bounds, cell_size_deg: f64) -> Result<Self, ModelError> {
        if !(cell_size_deg.is_finite() && cell_size_deg > 0.0) {
            return Err(ModelError::InvalidCellSize(cell_size_deg));
        }
        for v in [bounds.min_lon, bounds.max_lon, bounds.min_lat, bounds.max_lat] {
            ensure_finite("grid bounds", v)?;
        }
        if bounds.max_lon <= bounds.min_lon
            || bounds.max_lat <= bounds.min_lat
            || bounds.min_lat < -90.0
            || bounds.max_lat > 90.0
        {
            return Err(ModelError::InvalidBounds {
                min_lon: bounds.min_lon,
                max_lon: bounds.max_lon,
                min_lat: bounds.min_lat,
                max_lat: bounds.max_lat,
            });
        }

        let width = cells_across(bounds.max_lon - bounds.min_lon, cell_size_deg);
        let height = cells_across(bounds.max_lat - bounds.min_lat, cell_size_deg);
        let cells = width
            .checked_mul(height)
            .filter(|&cells| cells <= MAX_GRID_CELLS)
            .ok_or(ModelError::GridTooLarge { width, height })?;

        let mut lats = Vec::with_capacity(cells);
        let mut lons = Vec::with_capacity(cells);
        for row in 0..height {
            let lat = (bounds.min_lat + (row as f64 + 0.5) * cell_size_deg).min(bounds.max_lat);
            for col in 0..width {
                let lon = (bounds.min_lon + (col as f64 + 0.5) * cell_size_deg).min(bounds.max_lon);
                lats.push(lat);
                lons.push(lon);
            }
        }

        Self::new(lats, lons, width, height)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.lats.len() != self.lons.len() {
            return Err(ModelError::MismatchedGrid { lats: self.lats.len(), lons: self.lons.len() });
        }
        if self.lats.is_empty() || self.width == 0 || self.height == 0 {
            return Err(ModelError::EmptyGrid);
        }
        if self.width.checked_mul(self.height) != Some(self.lats.len()) {
            return Err(ModelError::ShapeMismatch {
                width: self.width,
                height: self.height,
                cells: self.lats.len(),
            });
        }
        for (&lat, &lon) in self.lats.iter().zip(&self.lons) {
            LatLon::new(lat, lon).validate("grid cell")?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lats.is_empty()
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    #[inline]
    pub fn cell(&self, index: usize) -> LatLon {
        LatLon::new(self.lats[index], self.lons[index])
    }
}

/// Number of cells covering `span`, tolerating spans that are an exact
/// multiple of the cell size up to rounding.
fn cells_across(span: f64, cell: f64) -> usize {
    let n = span / cell;
    let n = if (n - n.round()).abs() < 1e-9 { n.round() } else { n.ceil() };
    (n as usize).max(1)
}

/// Dense surface wind speed field in m/s, row-major, same shape as the
/// [`GridSpec`] it was evaluated on. Coordinate math uses f64; speeds are f32.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindField {
    pub data: Vec<f32>,
    pub width: usize,
    pub height: usize,
}

impl WindField {
    /// Zero-filled field matching `grid`.
    pub fn for_grid(grid: &GridSpec) -> Self {
        Self {
            data: vec![0.0; grid.width * grid.height],
            width: grid.width,
            height: grid.height,
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.width + col]
    }

    pub fn min_speed(&self) -> f32 {
        self.data.iter().cloned().fold(f32::INFINITY, f32::min)
    }

    pub fn max_speed(&self) -> f32 {
        self.data.iter().cloned().fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn mean_speed(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.data.iter().map(|&v| v as f64).sum();
        (sum / self.data.len() as f64) as f32
    }

    /// Row and column of the strongest wind.
    pub fn argmax(&self) -> Option<(usize, usize)> {
        self.data
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| (i / self.width, i % self.width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds { min_lon: -42.0, max_lon: -38.0, min_lat: -57.0, max_lat: -54.0 }
    }

    #[test]
    fn from_bounds_places_cell_centres_row_major() {
        let g = GridSpec::from_bounds(bounds(), 0.5).unwrap();
        assert_eq!(g.width, 8);
        assert_eq!(g.height, 6);
        assert_eq!(g.len(), 48);
        let first = g.cell(0);
        assert!((first.lon + 41.75).abs() < 1e-12 && (first.lat + 56.75).abs() < 1e-12);
        // Longitude varies fastest.
        assert!((g.cell(1).lon + 41.25).abs() < 1e-12);
        assert_eq!(g.cell(1).lat, first.lat);
        assert!((g.cell(g.index(1, 0)).lat + 56.25).abs() < 1e-12);
    }

    #[test]
    fn from_bounds_tolerates_inexact_cell_size() {
        let g = GridSpec::from_bounds(bounds(), 0.1).unwrap();
        assert_eq!(g.width, 40);
        assert_eq!(g.height, 30);
    }

    #[test]
    fn from_bounds_rejects_bad_input() {
        assert_eq!(
            GridSpec::from_bounds(bounds(), 0.0).unwrap_err(),
            ModelError::InvalidCellSize(0.0)
        );
        let inverted = Bounds { min_lon: 1.0, max_lon: 0.0, ..bounds() };
        assert!(matches!(
            GridSpec::from_bounds(inverted, 0.5),
            Err(ModelError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn from_bounds_rejects_unallocatable_resolution() {
        let b = Bounds { min_lon: -44.0, max_lon: -36.0, min_lat: -58.0, max_lat: -52.0 };
        assert!(matches!(
            GridSpec::from_bounds(b, 1e-12),
            Err(ModelError::GridTooLarge { .. })
        ));
        // Fits in usize but not in memory.
        assert!(matches!(
            GridSpec::from_bounds(b, 1e-5),
            Err(ModelError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn new_rejects_degenerate_grids() {
        assert_eq!(GridSpec::new(vec![], vec![], 0, 0).unwrap_err(), ModelError::EmptyGrid);
        assert_eq!(
            GridSpec::new(vec![0.0, 1.0], vec![0.0], 1, 2).unwrap_err(),
            ModelError::MismatchedGrid { lats: 2, lons: 1 }
        );
        assert_eq!(
            GridSpec::new(vec![0.0, 1.0], vec![0.0, 0.0], 3, 1).unwrap_err(),
            ModelError::ShapeMismatch { width: 3, height: 1, cells: 2 }
        );
        assert_eq!(
            GridSpec::new(vec![95.0], vec![0.0], 1, 1).unwrap_err(),
            ModelError::LatitudeOutOfRange(95.0)
        );
    }

    #[test]
    fn wind_field_stats() {
        let g = GridSpec::new(vec![0.0; 6], vec![0.0; 6], 3, 2).unwrap();
        let mut f = WindField::for_grid(&g);
        f.data[1] = 4.0;
        f.data[5] = 8.0;
        assert_eq!(f.get(1, 2), 8.0);
        assert_eq!(f.min_speed(), 0.0);
        assert_eq!(f.max_speed(), 8.0);
        assert!((f.mean_speed() - 2.0).abs() < 1e-6);
        assert_eq!(f.argmax(), Some((1, 2)));
    }
}
