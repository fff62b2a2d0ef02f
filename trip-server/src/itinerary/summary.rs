//! Aggregate totals and day-budget autofill.

use serde::Serialize;

use crate::domain::Destination;

/// Where the planned days sit relative to the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    /// More days planned than budgeted.
    Over,
    /// Planned days exactly match the budget.
    Exact,
    /// Budget not yet fully allocated.
    Under,
}

/// One-pass totals over the itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TripSummary {
    pub total_planned_days: u64,
    pub total_accommodation_cost: f64,
    pub total_transport_cost: f64,
    /// Budget minus planned days; negative means over-allocated.
    pub remaining_days: i64,
    pub status: BudgetStatus,
}

/// Compute all totals in a single pass.
///
/// Unset costs count as zero, never as an error. The last destination's
/// transport cost is summed even though no leg departs the final stay; the
/// field is inert but deliberately not excluded, matching the model's
/// "carried but unused" invariant.
pub fn summarize(total_days_budget: u32, destinations: &[Destination]) -> TripSummary {
    let mut planned: u64 = 0;
    let mut accommodation = 0.0;
    let mut transport = 0.0;

    for dest in destinations {
        planned += u64::from(dest.days);
        accommodation += dest.accommodation_cost.unwrap_or(0.0);
        transport += dest.transport_cost.unwrap_or(0.0);
    }

    let remaining = i64::from(total_days_budget) - planned as i64;
    let status = match remaining {
        r if r < 0 => BudgetStatus::Over,
        0 => BudgetStatus::Exact,
        _ => BudgetStatus::Under,
    };

    TripSummary {
        total_planned_days: planned,
        total_accommodation_cost: accommodation,
        total_transport_cost: transport,
        remaining_days: remaining,
        status,
    }
}

/// Redistribute the day budget evenly across all destinations.
///
/// Integer division assigns `budget / n` days everywhere; the remainder
/// `budget % n` is distributed one extra day to each of the first
/// `remainder` destinations in sequence order, so the assigned days always
/// sum to exactly the budget. Deterministic; no-op on an empty itinerary.
pub fn autofill(total_days_budget: u32, destinations: &mut [Destination]) {
    let n = destinations.len() as u32;
    if n == 0 {
        return;
    }
    let base = total_days_budget / n;
    let remainder = total_days_budget % n;

    for (i, dest) in destinations.iter_mut().enumerate() {
        let extra = u32::from((i as u32) < remainder);
        // A zero budget would assign zero days; the model floor is 1.
        dest.days = (base + extra).max(1);
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dest_shape() -> impl Strategy<Value = (u32, Option<f64>, Option<f64>)> {
        (
            1u32..60,
            proptest::option::of(0.0f64..5000.0),
            proptest::option::of(0.0f64..5000.0),
        )
    }

    fn destinations(
        range: std::ops::Range<usize>,
    ) -> impl Strategy<Value = Vec<Destination>> {
        proptest::collection::vec(dest_shape(), range).prop_map(|shapes| {
            shapes
                .into_iter()
                .map(|(days, acc, trans)| {
                    let mut d = Destination::new("stop");
                    d.days = days;
                    d.accommodation_cost = acc;
                    d.transport_cost = trans;
                    d
                })
                .collect()
        })
    }

    proptest! {
        /// Autofill is exact: assigned days sum to the budget, and the first
        /// `budget % n` destinations get exactly one more day than the rest.
        #[test]
        fn autofill_exactness(
            budget in 1u32..400,
            mut list in destinations(1..20),
        ) {
            let n = list.len() as u32;
            prop_assume!(budget >= n); // below n the >=1 floor intentionally overshoots

            autofill(budget, &mut list);

            let total: u32 = list.iter().map(|d| d.days).sum();
            prop_assert_eq!(total, budget);

            let base = budget / n;
            let remainder = (budget % n) as usize;
            for (i, d) in list.iter().enumerate() {
                let expected = if i < remainder { base + 1 } else { base };
                prop_assert_eq!(d.days, expected);
            }
        }

        /// Totals are order-independent: permuting the list never changes
        /// planned days or money totals.
        #[test]
        fn totals_permutation_invariant(
            budget in 1u32..400,
            list in destinations(2..15),
            rotation in 1usize..14,
        ) {
            let mut rotated = list.clone();
            let k = rotation % rotated.len();
            rotated.rotate_left(k);

            let a = summarize(budget, &list);
            let b = summarize(budget, &rotated);

            prop_assert_eq!(a.total_planned_days, b.total_planned_days);
            prop_assert!((a.total_accommodation_cost - b.total_accommodation_cost).abs() < 1e-6);
            prop_assert!((a.total_transport_cost - b.total_transport_cost).abs() < 1e-6);
            prop_assert_eq!(a.remaining_days, b.remaining_days);
        }

        /// remaining_days sign always matches the status enum.
        #[test]
        fn status_matches_sign(
            budget in 0u32..400,
            list in destinations(0..15),
        ) {
            let s = summarize(budget, &list);
            match s.status {
                BudgetStatus::Over => prop_assert!(s.remaining_days < 0),
                BudgetStatus::Exact => prop_assert_eq!(s.remaining_days, 0),
                BudgetStatus::Under => prop_assert!(s.remaining_days > 0),
            }
        }
    }
}
