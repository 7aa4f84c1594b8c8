use super::*;

#[test]
fn pace_matches_reference_value() {
    assert_eq!(pace(3.15, "00:22:00").unwrap(), "06'59\"");
}

#[test]
fn pace_rejects_non_positive_distance() {
    for d in [0.0, -1.0, f64::NAN] {
        let err = pace(d, "00:22:00").unwrap_err();
        assert!(matches!(err, KeepError::Domain(_)), "{d}: {err}");
    }
}

#[test]
fn cost_is_700_kcal_per_hour_rounded() {
    assert_eq!(cost("00:35:00").unwrap(), 408);
    assert_eq!(cost("01:00:00").unwrap(), 700);
    assert_eq!(cost("00:00:00").unwrap(), 0);
}

#[test]
fn stride_zero_guard() {
    assert_eq!(stride(3.2, 0.0, 1320), "0.00");
    assert_eq!(stride(99.0, -5.0, 1320), "0.00");
    assert_eq!(stride(3.2, 130.0, 0), "0.00");
}

#[test]
fn stride_is_metres_per_step() {
    // 3.3 km over 22 minutes at 150 spm: 3300 / 3300 steps.
    assert_eq!(stride(3.3, 150.0, 22 * 60), "1.00");
    assert_eq!(stride(3.15, 132.0, 21 * 60 + 30), "1.11");
}

#[test]
fn start_time_subtracts_duration() {
    assert_eq!(start_time("07:30:00", "00:35:20").unwrap(), "06:54:40");
    assert_eq!(start_time("7:30", "0:0").unwrap(), "07:30:00");
}

#[test]
fn start_time_wraps_past_midnight() {
    assert_eq!(start_time("00:10:00", "00:35:00").unwrap(), "23:35:00");
}

#[test]
fn start_time_rejects_out_of_clock_end_time() {
    assert!(matches!(
        start_time("25:00:00", "00:10:00").unwrap_err(),
        KeepError::Format(_)
    ));
    assert!(start_time("noon", "00:10:00").is_err());
}
