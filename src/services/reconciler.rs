use crate::types::{DayPlan, ItineraryResult};

/// How a decoded itinerary's length compared with the requested duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCountAdjustment {
    Unchanged,
    Truncated { dropped: usize },
    Padded { added: usize },
}

impl DayCountAdjustment {
    pub fn between(generated: usize, requested: usize) -> Self {
        if generated > requested {
            DayCountAdjustment::Truncated {
                dropped: generated - requested,
            }
        } else if generated < requested {
            DayCountAdjustment::Padded {
                added: requested - generated,
            }
        } else {
            DayCountAdjustment::Unchanged
        }
    }
}

/// Force the itinerary to exactly `requested_days` days.
///
/// Extra days are dropped from the tail. Missing days repeat the activities of the
/// last generated day. Day numbers always come out as `1..=requested_days` in order:
/// the numbers the model wrote are discarded, even when the length already matches.
///
/// An empty itinerary has nothing to repeat and is returned empty; the decoder never
/// lets one through.
pub fn reconcile_itinerary(mut result: ItineraryResult, requested_days: u32) -> ItineraryResult {
    result.itinerary.truncate(requested_days as usize);
    renumber(&mut result.itinerary);

    if let Some(last) = result.itinerary.last().cloned() {
        let next = last.day + 1;
        result
            .itinerary
            .extend((next..=requested_days).map(|day| last.renumbered(day)));
    }

    result
}

fn renumber(days: &mut [DayPlan]) {
    for (index, day) in days.iter_mut().enumerate() {
        day.day = index as u32 + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActivityBlock;

    fn day(number: u32, label: &str) -> DayPlan {
        let block = |slot: &str| {
            ActivityBlock::new(format!("{label} {slot}"), format!("{label} {slot} detail"))
        };
        DayPlan {
            day: number,
            morning: block("morning"),
            afternoon: block("afternoon"),
            evening: block("evening"),
            night: block("night"),
        }
    }

    fn itinerary(days: usize) -> ItineraryResult {
        ItineraryResult {
            itinerary: (1..=days as u32).map(|n| day(n, &format!("day{n}"))).collect(),
            estimated_cost: 120_000,
            cautions: vec!["Check the weather".to_string()],
        }
    }

    fn day_numbers(result: &ItineraryResult) -> Vec<u32> {
        result.itinerary.iter().map(|d| d.day).collect()
    }

    #[test]
    fn test_exact_length_is_unchanged() {
        let original = itinerary(3);
        assert_eq!(reconcile_itinerary(original.clone(), 3), original);
    }

    #[test]
    fn test_truncates_tail() {
        let original = itinerary(5);
        let reconciled = reconcile_itinerary(original.clone(), 2);

        assert_eq!(reconciled.itinerary, original.itinerary[..2].to_vec());
        assert_eq!(reconciled.estimated_cost, original.estimated_cost);
        assert_eq!(reconciled.cautions, original.cautions);
    }

    #[test]
    fn test_pads_with_last_day_content() {
        let original = itinerary(2);
        let reconciled = reconcile_itinerary(original.clone(), 5);

        assert_eq!(day_numbers(&reconciled), vec![1, 2, 3, 4, 5]);
        assert_eq!(reconciled.itinerary[..2], original.itinerary[..]);
        for padded in &reconciled.itinerary[2..] {
            assert_eq!(padded.blocks(), original.itinerary[1].blocks());
        }
    }

    #[test]
    fn test_every_duration_yields_contiguous_days() {
        for generated in 1..=6 {
            for requested in 1..=30u32 {
                let reconciled = reconcile_itinerary(itinerary(generated), requested);
                assert_eq!(
                    day_numbers(&reconciled),
                    (1..=requested).collect::<Vec<_>>(),
                    "generated {generated}, requested {requested}"
                );
            }
        }
    }

    #[test]
    fn test_model_day_numbers_are_normalized() {
        let mut original = itinerary(3);
        original.itinerary[0].day = 0;
        original.itinerary[2].day = 2;

        let reconciled = reconcile_itinerary(original, 3);
        assert_eq!(day_numbers(&reconciled), vec![1, 2, 3]);
    }

    #[test]
    fn test_model_day_numbers_discarded_at_matching_length() {
        let mut original = itinerary(2);
        original.itinerary[0].day = 3;
        original.itinerary[1].day = 7;

        let reconciled = reconcile_itinerary(original.clone(), 2);
        assert_eq!(day_numbers(&reconciled), vec![1, 2]);
        assert_eq!(reconciled.itinerary[1].blocks(), original.itinerary[1].blocks());

        let padded = reconcile_itinerary(original.clone(), 4);
        assert_eq!(day_numbers(&padded), vec![1, 2, 3, 4]);
        assert_eq!(padded.itinerary[3], original.itinerary[1].renumbered(4));
    }

    #[test]
    fn test_empty_itinerary_stays_empty() {
        let reconciled = reconcile_itinerary(itinerary(0), 3);
        assert!(reconciled.itinerary.is_empty());
    }

    #[test]
    fn test_adjustment_classification() {
        assert_eq!(DayCountAdjustment::between(3, 3), DayCountAdjustment::Unchanged);
        assert_eq!(
            DayCountAdjustment::between(5, 3),
            DayCountAdjustment::Truncated { dropped: 2 }
        );
        assert_eq!(
            DayCountAdjustment::between(1, 4),
            DayCountAdjustment::Padded { added: 3 }
        );
    }
}
