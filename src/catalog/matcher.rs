//! Nearest-color lookup over the catalog keys
//!
//! A linear scan in ascending key order that only replaces the best match on a
//! strictly smaller distance, so the lowest key by (R, G, B, A) wins ties.

use crate::catalog::TileCatalog;
use crate::color::{Color, ColorMetric, EuclideanRgb};
use crate::io::error::{MosaicError, Result};

/// Finds the catalog color closest to a target under a `ColorMetric`
#[derive(Debug, Clone)]
pub struct NearestColorMatcher<M = EuclideanRgb> {
    metric: M,
    first: Color,
    rest: Vec<Color>,
}

impl NearestColorMatcher<EuclideanRgb> {
    /// Create a matcher using Euclidean RGB distance
    ///
    /// # Errors
    ///
    /// Returns `MosaicError::EmptyCatalog` if the catalog has no entries
    pub fn euclidean(catalog: &TileCatalog) -> Result<Self> {
        Self::new(catalog, EuclideanRgb)
    }
}

impl<M: ColorMetric> NearestColorMatcher<M> {
    /// Create a matcher over the keys of `catalog`
    ///
    /// # Errors
    ///
    /// Returns `MosaicError::EmptyCatalog` if the catalog has no entries
    pub fn new(catalog: &TileCatalog, metric: M) -> Result<Self> {
        if catalog.is_empty() {
            return Err(MosaicError::EmptyCatalog {
                directory: catalog.directory().map(std::path::Path::to_path_buf),
            });
        }
        Self::from_colors(catalog.colors(), metric)
    }

    /// Create a matcher over an arbitrary set of colors
    ///
    /// Colors are sorted and deduplicated before use.
    ///
    /// # Errors
    ///
    /// Returns `MosaicError::EmptyCatalog` if `colors` is empty
    pub fn from_colors(colors: impl IntoIterator<Item = Color>, metric: M) -> Result<Self> {
        let mut keys: Vec<Color> = colors.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();

        let mut keys = keys.into_iter();
        let first = keys
            .next()
            .ok_or(MosaicError::EmptyCatalog { directory: None })?;

        Ok(Self {
            metric,
            first,
            rest: keys.collect(),
        })
    }

    /// Catalog color nearest to `target`
    pub fn nearest(&self, target: Color) -> Color {
        let seed = (self.first, self.metric.distance(target, self.first));
        let (best, _) = self.rest.iter().fold(seed, |(best, min_distance), &candidate| {
            let distance = self.metric.distance(target, candidate);
            if distance < min_distance {
                (candidate, distance)
            } else {
                (best, min_distance)
            }
        });
        best
    }

    /// Distance from `target` to its nearest catalog color
    pub fn nearest_distance(&self, target: Color) -> f64 {
        self.metric.distance(target, self.nearest(target))
    }

    /// Number of colors searched per lookup
    pub fn color_count(&self) -> usize {
        self.rest.len() + 1
    }
}
