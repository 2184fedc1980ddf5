//! Coordinate and record types.

use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees.
///
/// No range clamping is applied. Loaders are responsible for rejecting
/// non-finite values before matching, and the assignment engine re-checks
/// finiteness so NaN can never poison a distance comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// L1 distance in raw coordinate degrees: `|dlat| + |dlon|`.
    ///
    /// This is not a geodesic distance. The surveys this tool handles sit
    /// within sub-degree extents, where the cheap metric ranks neighbours the
    /// same way a great-circle distance would.
    #[must_use]
    pub fn degree_distance(&self, other: &GeoPoint) -> f64 {
        (self.lat - other.lat).abs() + (self.lon - other.lon).abs()
    }

    /// True when both components are finite (no NaN, no infinities).
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// A query row from the lateral survey table.
///
/// Passthrough columns stay behind in the backing table; records carry only
/// what the matcher consumes plus the row index needed to line results back
/// up with the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LateralRecord {
    /// Zero-based data-row index in the lateral table (header excluded).
    pub row: usize,
    pub point: GeoPoint,
}

impl LateralRecord {
    pub fn new(row: usize, point: GeoPoint) -> Self {
        Self { row, point }
    }
}

/// A candidate row from the raw event/image table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Zero-based data-row index in the raw table (header excluded).
    pub row: usize,
    pub point: GeoPoint,
    /// Image filename. Not required to be unique across the table; when two
    /// candidates tie on distance, pool order decides.
    pub filename: String,
}

impl RawRecord {
    pub fn new(row: usize, point: GeoPoint, filename: impl Into<String>) -> Self {
        Self {
            row,
            point,
            filename: filename.into(),
        }
    }
}
