use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::core::{Axis, AxisId, DataPoint, Series};

/// One resolved hit-test result.
///
/// `point_index` addresses the caller's original data: gap entries keep their
/// index, so this is stable across normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyPoint {
    pub series_index: usize,
    pub point_index: usize,
    pub point: DataPoint,
    pub pixel: (f64, f64),
}

/// Finds the data point nearest to a plot-local pixel position.
///
/// Candidates are prefiltered with a per-axis bounding box (the pixel radius
/// converted into data-space deltas, so independently-scaled axes are handled
/// correctly), then the squared pixel distance decides. Ties keep the first
/// match in series order. `None` is the normal no-match outcome.
#[must_use]
pub fn find_nearby(
    series: &[Series],
    axes: &IndexMap<AxisId, Axis>,
    x: f64,
    y: f64,
    radius_px: f64,
) -> Option<NearbyPoint> {
    if !x.is_finite() || !y.is_finite() || !radius_px.is_finite() || radius_px <= 0.0 {
        return None;
    }
    let radius_sq = radius_px * radius_px;

    let mut candidates: SmallVec<[(OrderedFloat<f64>, NearbyPoint); 4]> = SmallVec::new();
    for (series_index, entry) in series.iter().enumerate() {
        let Some(tx) = axes.get(&entry.x_axis()).and_then(Axis::transform) else {
            continue;
        };
        let Some(ty) = axes.get(&entry.y_axis()).and_then(Axis::transform) else {
            continue;
        };

        // Pointer position and search radius expressed in data space.
        let mx = tx.c2p(x);
        let my = ty.c2p(y);
        let max_dx = radius_px / tx.scale();
        let max_dy = radius_px / ty.scale();

        let mut best: Option<(f64, NearbyPoint)> = None;
        for (point_index, sample) in entry.points().iter().enumerate() {
            let Some(point) = sample else { continue };
            if (point.x - mx).abs() > max_dx || (point.y - my).abs() > max_dy {
                continue;
            }

            let px = tx.p2c(point.x);
            let py = ty.p2c(point.y);
            let distance_sq = (px - x).powi(2) + (py - y).powi(2);
            if distance_sq > radius_sq {
                continue;
            }

            // Strict comparison keeps the earliest point on exact ties.
            let is_better = best.as_ref().is_none_or(|(d, _)| distance_sq < *d);
            if is_better {
                best = Some((
                    distance_sq,
                    NearbyPoint {
                        series_index,
                        point_index,
                        point: *point,
                        pixel: (px, py),
                    },
                ));
            }
        }

        if let Some((distance_sq, hit)) = best {
            candidates.push((OrderedFloat(distance_sq), hit));
        }
    }

    // `min_by_key` keeps the first minimum, i.e. the earliest series wins ties.
    candidates
        .into_iter()
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, hit)| hit)
}
