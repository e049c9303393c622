// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/frostguard

//! Threshold classification of a single zone reading

use crate::config::ZoneThresholds;
use crate::error::MonitorError;
use crate::zones::{Status, Zone};

/// Classify one temperature against the zone's configured bounds.
///
/// Outside the critical band is CRITICAL, outside the normal band but
/// within the critical band is WARNING, inside the normal band is OK.
/// Non-finite values are rejected up front: NaN compares false against
/// every bound and would otherwise fall through to OK.
pub fn classify(zone: Zone, value: f64, thresholds: &ZoneThresholds) -> Result<Status, MonitorError> {
    if !value.is_finite() {
        return Err(MonitorError::InvalidReading { zone, value });
    }

    let status = if value < thresholds.critical_low || value > thresholds.critical_high {
        Status::Critical
    } else if value < thresholds.normal_min || value > thresholds.normal_max {
        Status::Warning
    } else {
        Status::Ok
    };

    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaporator_thresholds() -> ZoneThresholds {
        ZoneThresholds {
            normal_min: -20.0,
            normal_max: -15.0,
            critical_low: -25.0,
            critical_high: -10.0,
        }
    }

    #[test]
    fn bands_classify_in_order() {
        let t = evaporator_thresholds();
        assert_eq!(classify(Zone::Evaporator, -18.0, &t).unwrap(), Status::Ok);
        assert_eq!(
            classify(Zone::Evaporator, -13.0, &t).unwrap(),
            Status::Warning
        );
        assert_eq!(
            classify(Zone::Evaporator, -22.0, &t).unwrap(),
            Status::Warning
        );
        assert_eq!(
            classify(Zone::Evaporator, -26.0, &t).unwrap(),
            Status::Critical
        );
        assert_eq!(
            classify(Zone::Evaporator, -8.0, &t).unwrap(),
            Status::Critical
        );
    }

    #[test]
    fn boundary_values_are_inside_their_band() {
        let t = evaporator_thresholds();
        // Exactly on a bound counts as within it.
        assert_eq!(classify(Zone::Evaporator, -20.0, &t).unwrap(), Status::Ok);
        assert_eq!(classify(Zone::Evaporator, -15.0, &t).unwrap(), Status::Ok);
        assert_eq!(
            classify(Zone::Evaporator, -25.0, &t).unwrap(),
            Status::Warning
        );
        assert_eq!(
            classify(Zone::Evaporator, -10.0, &t).unwrap(),
            Status::Warning
        );
    }

    #[test]
    fn rising_value_never_skips_back_to_ok() {
        let t = evaporator_thresholds();
        let mut previous = Status::Ok;
        let mut value = -17.0;
        while value <= -5.0 {
            let status = classify(Zone::Evaporator, value, &t).unwrap();
            assert!(status >= previous, "status regressed at {value}");
            previous = status;
            value += 0.25;
        }
        assert_eq!(previous, Status::Critical);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let t = evaporator_thresholds();
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = classify(Zone::Ambient, bad, &t).unwrap_err();
            assert!(matches!(err, MonitorError::InvalidReading { .. }));
        }
    }
}
