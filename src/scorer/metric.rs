use crate::config::MetricParams;
use crate::geometry::{Geometry, Slot};

/// Cursor travel between two slots: Euclidean over (row, col) within the
/// page plane, plus the page-switch weight when the pages differ. With
/// `thumb_reach` set, a rightmost-column endpoint costs no planar travel,
/// so the whole planar term collapses to zero; the page term still applies.
pub fn travel(geom: &Geometry, a: Slot, b: Slot, params: &MetricParams) -> f64 {
    let mut cost = 0.0;
    if a.page != b.page {
        cost += params.page_switch_weight;
    }
    if params.thumb_reach && (geom.is_thumb_col(a) || geom.is_thumb_col(b)) {
        return cost;
    }
    let dr = f64::from(a.row) - f64::from(b.row);
    let dc = f64::from(a.col) - f64::from(b.col);
    cost + dr.hypot(dc)
}
