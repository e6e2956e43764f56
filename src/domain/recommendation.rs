//! Exploration ranking: the ordering rules for stale (place, category) pairs.
//!
//! One comparator serves both operating modes. Without an origin every
//! candidate carries `distance_km = None` and the distance key is inert;
//! with an origin, distance dominates and staleness/randomness only break
//! ties. Keeping a single code path guarantees the tie-break rules cannot
//! drift between modes.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::geo::GeoPoint;
use crate::domain::place::Place;
use crate::domain::types::{CategoryId, CategoryName, DistanceKm, PlaceId, PlaceName};

/// A (place, category) pair eligible for re-exploration, joined with the
/// attributes the ranking engine needs.
#[derive(Debug, Clone)]
pub struct StaleCandidate {
    pub place: Place,
    pub category: Category,
    pub last_reviewed_at: Option<NaiveDateTime>,
}

impl StaleCandidate {
    /// Flattens the candidate into an output record, attaching the distance
    /// from `origin` when one is supplied.
    pub fn into_recommendation(self, origin: Option<&GeoPoint>) -> ExplorationRecommendation {
        let distance_km = origin.map(|origin| origin.distance_km(&self.place.point));
        ExplorationRecommendation {
            place_id: self.place.id,
            place_name: self.place.name,
            category_id: self.category.id,
            category_name: self.category.name,
            last_reviewed_at: self.last_reviewed_at,
            distance_km,
        }
    }
}

/// A ranked (place, category) suggestion for re-review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorationRecommendation {
    pub place_id: PlaceId,
    pub place_name: PlaceName,
    pub category_id: CategoryId,
    pub category_name: CategoryName,
    pub last_reviewed_at: Option<NaiveDateTime>,
    pub distance_km: Option<DistanceKm>,
}

/// Staleness predicate shared by every evaluator implementation.
///
/// A pair with no timestamped review is always stale; a timestamped pair is
/// stale only when its latest review is strictly older than the cutoff. A
/// review exactly at the cutoff is still fresh.
pub fn is_stale(last_reviewed_at: Option<NaiveDateTime>, cutoff: NaiveDateTime) -> bool {
    match last_reviewed_at {
        None => true,
        Some(reviewed_at) => reviewed_at < cutoff,
    }
}

fn cmp_distance(a: Option<DistanceKm>, b: Option<DistanceKm>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.get().total_cmp(&b.get()),
        // A known distance ranks ahead of an unknown one.
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Relative urgency of two candidates, ignoring the random tie-break.
///
/// Distance ascending first (inert when absent on both sides), then last
/// review ascending with never-reviewed pairs sorting ahead of any
/// timestamped pair.
pub fn exploration_order(a: &ExplorationRecommendation, b: &ExplorationRecommendation) -> Ordering {
    cmp_distance(a.distance_km, b.distance_km)
        .then_with(|| a.last_reviewed_at.cmp(&b.last_reviewed_at))
}

/// Orders candidates and truncates to `limit`.
///
/// Equal-urgency candidates are separated by a random key drawn fresh per
/// candidate on every call, so equally neglected pairs rotate between calls
/// instead of replaying insertion order.
pub fn rank<R: RngCore>(
    candidates: Vec<ExplorationRecommendation>,
    limit: usize,
    rng: &mut R,
) -> Vec<ExplorationRecommendation> {
    let mut keyed: Vec<(u64, ExplorationRecommendation)> = candidates
        .into_iter()
        .map(|candidate| (rng.next_u64(), candidate))
        .collect();

    keyed.sort_by(|(key_a, a), (key_b, b)| exploration_order(a, b).then(key_a.cmp(key_b)));
    keyed.truncate(limit);

    keyed.into_iter().map(|(_, candidate)| candidate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn candidate(
        place_id: i32,
        last_reviewed_at: Option<NaiveDateTime>,
        distance_km: Option<f64>,
    ) -> ExplorationRecommendation {
        ExplorationRecommendation {
            place_id: PlaceId::new(place_id).unwrap(),
            place_name: PlaceName::new(format!("Place {place_id}")).unwrap(),
            category_id: CategoryId::new(1).unwrap(),
            category_name: CategoryName::new("Food").unwrap(),
            last_reviewed_at,
            distance_km: distance_km.map(|d| DistanceKm::new(d).unwrap()),
        }
    }

    #[test]
    fn never_reviewed_is_always_stale() {
        let cutoff = Utc::now().naive_utc();
        assert!(is_stale(None, cutoff));
    }

    #[test]
    fn staleness_cutoff_is_strict() {
        let cutoff = Utc::now().naive_utc();
        assert!(!is_stale(Some(cutoff), cutoff));
        assert!(is_stale(Some(cutoff - Duration::microseconds(1)), cutoff));
        assert!(!is_stale(Some(cutoff + Duration::seconds(1)), cutoff));
    }

    #[test]
    fn never_reviewed_ranks_ahead_of_any_timestamp() {
        let now = Utc::now().naive_utc();
        let ancient = candidate(1, Some(now - Duration::days(3650)), None);
        let never = candidate(2, None, None);
        assert_eq!(exploration_order(&never, &ancient), Ordering::Less);
    }

    #[test]
    fn older_reviews_rank_ahead_of_newer_ones() {
        let now = Utc::now().naive_utc();
        let older = candidate(1, Some(now - Duration::days(40)), None);
        let newer = candidate(2, Some(now - Duration::days(35)), None);
        assert_eq!(exploration_order(&older, &newer), Ordering::Less);
    }

    #[test]
    fn distance_dominates_staleness_when_present() {
        let now = Utc::now().naive_utc();
        let near_fresh = candidate(1, Some(now - Duration::days(31)), Some(0.5));
        let far_never = candidate(2, None, Some(8.0));
        assert_eq!(exploration_order(&near_fresh, &far_never), Ordering::Less);
    }

    #[test]
    fn staleness_breaks_equidistant_ties() {
        let now = Utc::now().naive_utc();
        let near_never = candidate(1, None, Some(2.0));
        let near_old = candidate(2, Some(now - Duration::days(60)), Some(2.0));
        assert_eq!(exploration_order(&near_never, &near_old), Ordering::Less);
    }

    #[test]
    fn rank_truncates_to_limit() {
        let candidates = (1..=5).map(|i| candidate(i, None, None)).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let ranked = rank(candidates, 3, &mut rng);
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn rank_keeps_urgency_order_above_randomness() {
        let now = Utc::now().naive_utc();
        let candidates = vec![
            candidate(1, Some(now - Duration::days(35)), None),
            candidate(2, None, None),
            candidate(3, Some(now - Duration::days(90)), None),
        ];
        let mut rng = StdRng::seed_from_u64(42);
        let ranked = rank(candidates, 10, &mut rng);
        assert_eq!(ranked[0].place_id, 2);
        assert_eq!(ranked[1].place_id, 3);
        assert_eq!(ranked[2].place_id, 1);
    }

    #[test]
    fn equally_stale_candidates_are_shuffled_between_calls() {
        let build = || (1..=8).map(|i| candidate(i, None, None)).collect::<Vec<_>>();

        let mut first_rng = StdRng::seed_from_u64(1);
        let mut second_rng = StdRng::seed_from_u64(2);
        let first: Vec<i32> = rank(build(), 8, &mut first_rng)
            .iter()
            .map(|c| c.place_id.get())
            .collect();
        let second: Vec<i32> = rank(build(), 8, &mut second_rng)
            .iter()
            .map(|c| c.place_id.get())
            .collect();

        assert_ne!(first, second);
        // Both orderings are permutations of the same stale set.
        let mut first_sorted = first.clone();
        let mut second_sorted = second.clone();
        first_sorted.sort_unstable();
        second_sorted.sort_unstable();
        assert_eq!(first_sorted, second_sorted);
    }
}
