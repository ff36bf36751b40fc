use std::ops::RangeInclusive;

use crate::{
    error::{Result, TripError},
    types::ItineraryRequest,
};

pub const DURATION_RANGE: RangeInclusive<u32> = 1..=30;
pub const GROUP_SIZE_RANGE: RangeInclusive<u32> = 1..=50;

/// Check an inbound request before any prompt is rendered or external call made.
pub fn validate_request(request: &ItineraryRequest) -> Result<()> {
    if request.destination.trim().is_empty() {
        return Err(TripError::validation(
            "destination",
            "destination is required",
        ));
    }

    if !DURATION_RANGE.contains(&request.duration) {
        return Err(TripError::validation(
            "duration",
            format!(
                "must be between {} and {} days, got {}",
                DURATION_RANGE.start(),
                DURATION_RANGE.end(),
                request.duration
            ),
        ));
    }

    if let Some(group_size) = request.group_size {
        if !GROUP_SIZE_RANGE.contains(&group_size) {
            return Err(TripError::validation(
                "group_size",
                format!(
                    "must be between {} and {} people, got {}",
                    GROUP_SIZE_RANGE.start(),
                    GROUP_SIZE_RANGE.end(),
                    group_size
                ),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(result: Result<()>) -> &'static str {
        match result {
            Err(TripError::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_duration_bounds() {
        assert_eq!(
            field_of(validate_request(&ItineraryRequest::new("Busan", 0))),
            "duration"
        );
        assert!(validate_request(&ItineraryRequest::new("Busan", 1)).is_ok());
        assert!(validate_request(&ItineraryRequest::new("Busan", 30)).is_ok());
        assert_eq!(
            field_of(validate_request(&ItineraryRequest::new("Busan", 31))),
            "duration"
        );
    }

    #[test]
    fn test_blank_destination() {
        assert_eq!(
            field_of(validate_request(&ItineraryRequest::new("", 3))),
            "destination"
        );
        assert_eq!(
            field_of(validate_request(&ItineraryRequest::new("   ", 3))),
            "destination"
        );
    }

    #[test]
    fn test_group_size_bounds() {
        let base = ItineraryRequest::new("Gyeongju", 2);

        assert!(validate_request(&base).is_ok());
        assert!(validate_request(&base.clone().with_group_size(1)).is_ok());
        assert!(validate_request(&base.clone().with_group_size(50)).is_ok());
        assert_eq!(
            field_of(validate_request(&base.clone().with_group_size(51))),
            "group_size"
        );
        assert_eq!(
            field_of(validate_request(&base.with_group_size(0))),
            "group_size"
        );
    }
}
