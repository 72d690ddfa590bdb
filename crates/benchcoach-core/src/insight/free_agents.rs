// Free-agent shortlist.

use std::cmp::Ordering;

use crate::lineup::{Metric, Player, Position};

/// Return up to `count` free agents ranked by `metric`, highest first.
///
/// When `positions` is given, only players whose primary position is in the
/// set are considered. Ties are broken by name, then id, so the order never
/// depends on input order. Returns fewer than `count` entries when the
/// filtered pool is smaller.
pub fn rank_free_agents<'a>(
    pool: &'a [Player],
    positions: Option<&[Position]>,
    count: usize,
    metric: Metric,
) -> Vec<&'a Player> {
    if count == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<&Player> = pool
        .iter()
        .filter(|p| positions.map_or(true, |wanted| wanted.contains(&p.position)))
        .collect();

    ranked.sort_by(|a, b| {
        b.points(metric)
            .partial_cmp(&a.points(metric))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });
    ranked.truncate(count);
    ranked
}
