/*
 * Copyright Contributors to the solid-earth-tide project
 * SPDX-License-Identifier: LGPL-2.1-or-later
 */

use chrono::{TimeZone, Utc};
use solid_earth_tide::driver::{grid_snapshot, point_timeseries, GridAttrs};
use solid_earth_tide::SolidTideError;

#[test]
fn point_snapshot_is_millimeter_scale_at_los_angeles() {
    let t = Utc.with_ymd_and_hms(2020, 12, 25, 12, 0, 0).unwrap();
    let samples = point_timeseries(34.0, -118.0, t, t, 3600, None).unwrap();
    assert_eq!(samples.len(), 1);
    let s = samples[0];
    assert!(s.east.abs() < 0.5, "east displacement out of plausible range: {}", s.east);
    assert!(s.north.abs() < 0.5, "north displacement out of plausible range: {}", s.north);
    assert!(s.up.abs() < 0.5, "up displacement out of plausible range: {}", s.up);
}

#[test]
fn point_series_over_a_month_is_bounded_and_continuous() {
    let start = Utc.with_ymd_and_hms(2020, 11, 5, 12, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2020, 11, 7, 0, 0, 0).unwrap();
    let samples = point_timeseries(34.0, -118.0, start, end, 3600, None).unwrap();
    assert!(!samples.is_empty());
    for pair in samples.windows(2) {
        let dt = (pair[1].time - pair[0].time).num_seconds();
        assert_eq!(dt, 3600);
        // No sample-to-sample jump should exceed a few centimeters at
        // hourly cadence.
        assert!((pair[1].up - pair[0].up).abs() < 0.05);
    }
}

#[test]
fn grid_snapshot_matches_raster_shape() {
    let t = Utc.with_ymd_and_hms(2020, 12, 25, 14, 7, 44).unwrap();
    let attrs = GridAttrs { length: 8, width: 10, y0: 33.8, x0: -118.2, dy: -0.05, dx: 0.05 };
    let (e, n, u) = grid_snapshot(t, &attrs).unwrap();
    assert_eq!(e.len(), 80);
    assert_eq!(n.len(), 80);
    assert_eq!(u.len(), 80);
    assert!(e.iter().chain(n.iter()).chain(u.iter()).all(|v| v.is_finite()));
}

#[test]
fn invalid_latitude_is_rejected_before_any_computation() {
    let t = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let err = point_timeseries(90.0, 0.0, t, t, 3600, None).unwrap_err();
    assert_eq!(err, SolidTideError::InvalidLatitude { lat_deg: 90.0 });
}

#[test]
fn invalid_longitude_is_rejected() {
    let t = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let err = point_timeseries(0.0, 360.0, t, t, 3600, None).unwrap_err();
    assert_eq!(err, SolidTideError::InvalidLongitude { lon_deg: 360.0 });
}

#[test]
fn verbose_callback_is_invoked_once_per_day() {
    let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2020, 1, 3, 0, 0, 0).unwrap();
    let mut days_seen = 0;
    let mut cb = |_msg: &str| days_seen += 1;
    point_timeseries(34.0, -118.0, start, end, 3600, Some(&mut cb)).unwrap();
    assert_eq!(days_seen, 3);
}
