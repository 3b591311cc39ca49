// Random marker placement. Overlaps are allowed; no collision avoidance.

use rand::Rng;

use super::Target;
use crate::config::GameConfig;

/// Place `count` markers uniformly inside the surface, keeping each footprint
/// in bounds. Returned ascending by id (1..=count).
pub fn generate_targets<R: Rng + ?Sized>(count: u32, cfg: &GameConfig, rng: &mut R) -> Vec<Target> {
    let span_x = cfg.surface_width - cfg.target_size;
    let span_y = cfg.surface_height - cfg.target_size;
    (1..=count)
        .map(|id| Target {
            id,
            x: sample(rng, span_x),
            y: sample(rng, span_y),
            is_clicked: false,
        })
        .collect()
}

/// Uniform draw from `[0, span)`, or 0 when the marker does not fit.
fn sample<R: Rng + ?Sized>(rng: &mut R, span: f64) -> f64 {
    if span > 0.0 { rng.gen_range(0.0..span) } else { 0.0 }
}

/// Inverse stacking: lower ids paint above higher ids.
pub fn stack_priority(id: u32, max_priority: i32) -> i32 {
    max_priority.saturating_sub(i32::try_from(id).unwrap_or(i32::MAX))
}
