/*
 * Copyright Contributors to the solid-earth-tide project
 * SPDX-License-Identifier: LGPL-2.1-or-later
 */

//! Bulk drivers built on the kernel in [`crate::tide`]: a fixed-point
//! time series over a UTC interval, and a single-instant snapshot
//! over a lat/lon raster.

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};

use crate::error::{Result, SolidTideError};
use crate::ephemeris::{moon_ecef, sun_ecef};
use crate::geometry::{ecef_to_enu, llh_to_ecef, LLH};
use crate::time::{civil_to_mjd, validate_year, CivDate, MjdDate};
use crate::tide::detide;

/// One sample produced by [`point_timeseries`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TideSample {
    pub time: DateTime<Utc>,
    pub east: f64,
    pub north: f64,
    pub up: f64,
}

/// Raster descriptor for [`grid_snapshot`]: `length` rows by `width`
/// columns, northwest corner at `(y0, x0)` degrees, step `(dy, dx)`
/// degrees (`dy` is typically negative, rows running south).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridAttrs {
    pub length: usize,
    pub width: usize,
    pub y0: f64,
    pub x0: f64,
    pub dy: f64,
    pub dx: f64,
}

fn validate_lat(lat_deg: f64) -> Result<()> {
    if lat_deg <= -90.0 || lat_deg >= 90.0 {
        Err(SolidTideError::InvalidLatitude { lat_deg })
    } else {
        Ok(())
    }
}

fn validate_lon(lon_deg: f64) -> Result<()> {
    if lon_deg <= -360.0 || lon_deg >= 360.0 {
        Err(SolidTideError::InvalidLongitude { lon_deg })
    } else {
        Ok(())
    }
}

fn validate_step(step_sec: i64) -> Result<()> {
    if step_sec <= 0 || 86400 % step_sec != 0 {
        Err(SolidTideError::InvalidStep { step_sec })
    } else {
        Ok(())
    }
}

fn normalize_lon(lon_deg: f64) -> f64 {
    if lon_deg < 0.0 {
        lon_deg + 360.0
    } else {
        lon_deg
    }
}

fn civdate_from_chrono(t: &DateTime<Utc>) -> CivDate {
    let secs = t.second() as f64 + t.nanosecond() as f64 / 1.0e9;
    CivDate::new(t.year(), t.month(), t.day(), t.hour(), t.minute(), secs)
}

fn displacement_enu(lat_deg: f64, lon_deg: f64, j: &MjdDate, xsun: &crate::geometry::XYZ, xmoon: &crate::geometry::XYZ) -> (f64, f64, f64) {
    let llh = LLH::new(lat_deg.to_radians(), normalize_lon(lon_deg).to_radians(), 0.0);
    let xsta = llh_to_ecef(&llh);
    let d = detide(&xsta, j, xsun, xmoon);
    let enu = ecef_to_enu(&d, &llh);
    (enu.y, enu.x, enu.z) // (east, north, up)
}

/// Computes one calendar day's worth of samples at `step_sec`
/// granularity, starting from local midnight UTC of `day`.
pub fn solve_point_day(
    lat_deg: f64,
    lon_deg: f64,
    day: &DateTime<Utc>,
    step_sec: i64,
) -> Vec<TideSample> {
    let n = 86400 / step_sec;
    let midnight = day.date_naive().and_hms_opt(0, 0, 0).unwrap().and_utc();
    let c0 = civdate_from_chrono(&midnight);
    let mut j = civil_to_mjd(&c0);

    let mut samples = Vec::with_capacity(n as usize);
    for _ in 0..n {
        // Snap to one-second granularity to avoid drift accumulating
        // over many additions of 1/n.
        let snapped_fmjd = (j.fmjd * 86400.0).round() / 86400.0;
        let jsnap = MjdDate::new(j.mjd, snapped_fmjd);

        let xsun = sun_ecef(&jsnap);
        let xmoon = moon_ecef(&jsnap);
        let (e, n_, u) = displacement_enu(lat_deg, lon_deg, &jsnap, &xsun, &xmoon);

        let t = midnight + Duration::seconds((jsnap.fmjd * 86400.0).round() as i64);
        samples.push(TideSample { time: t, east: e, north: n_, up: u });

        j = MjdDate::new(j.mjd, j.fmjd + 1.0 / n as f64);
    }
    samples
}

/// Time series of topocentric displacement at a fixed point, over
/// `[start_utc, end_utc]`, sampled every `step_sec` seconds.
pub fn point_timeseries(
    lat_deg: f64,
    lon_deg: f64,
    start_utc: DateTime<Utc>,
    end_utc: DateTime<Utc>,
    step_sec: i64,
    mut verbose: Option<&mut dyn FnMut(&str)>,
) -> Result<Vec<TideSample>> {
    validate_lat(lat_deg)?;
    validate_lon(lon_deg)?;
    validate_step(step_sec)?;
    validate_year(start_utc.year())?;
    validate_year(end_utc.year())?;

    let mut out = Vec::new();
    let mut day = start_utc.date_naive().and_hms_opt(0, 0, 0).unwrap().and_utc();
    let last_day = end_utc.date_naive().and_hms_opt(0, 0, 0).unwrap().and_utc();

    while day <= last_day {
        if let Some(cb) = verbose.as_deref_mut() {
            cb(&format!("solving {}", day.date_naive()));
        }
        let mut day_samples = solve_point_day(lat_deg, lon_deg, &day, step_sec);
        if day == start_utc.date_naive().and_hms_opt(0, 0, 0).unwrap().and_utc() {
            day_samples.retain(|s| s.time >= start_utc);
        }
        if day == last_day {
            day_samples.retain(|s| s.time <= end_utc);
        }
        out.extend(day_samples);
        day += Duration::days(1);
    }

    Ok(out)
}

/// Snapshot of topocentric displacement over a lat/lon raster at a
/// single UTC instant. Sun and Moon positions are computed once and
/// reused for every cell.
pub fn grid_snapshot(t_utc: DateTime<Utc>, attrs: &GridAttrs) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>)> {
    if attrs.length == 0 || attrs.width == 0 || !attrs.dy.is_finite() || !attrs.dx.is_finite() {
        return Err(SolidTideError::InvalidGrid { reason: "length/width must be positive and steps finite" });
    }
    validate_year(t_utc.year())?;

    let c = civdate_from_chrono(&t_utc);
    let j = civil_to_mjd(&c);
    let xsun = sun_ecef(&j);
    let xmoon = moon_ecef(&j);

    let mut east = vec![0.0; attrs.length * attrs.width];
    let mut north = vec![0.0; attrs.length * attrs.width];
    let mut up = vec![0.0; attrs.length * attrs.width];

    for row in 0..attrs.length {
        let lat_deg = attrs.y0 + attrs.dy * row as f64;
        for col in 0..attrs.width {
            let lon_deg = attrs.x0 + attrs.dx * col as f64;
            let idx = row * attrs.width + col;
            let (e, n, u) = displacement_enu(lat_deg, lon_deg, &j, &xsun, &xmoon);
            east[idx] = e;
            north[idx] = n;
            up[idx] = u;
        }
    }

    Ok((east, north, up))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn point_timeseries_rejects_bad_latitude() {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
        let err = point_timeseries(91.0, 0.0, start, end, 3600, None).unwrap_err();
        assert_eq!(err, SolidTideError::InvalidLatitude { lat_deg: 91.0 });
    }

    #[test]
    fn point_timeseries_rejects_bad_step() {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
        let err = point_timeseries(0.0, 0.0, start, end, 7, None).unwrap_err();
        assert_eq!(err, SolidTideError::InvalidStep { step_sec: 7 });
    }

    #[test]
    fn point_timeseries_one_day_has_expected_sample_count() {
        let start = Utc.with_ymd_and_hms(2020, 12, 25, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2020, 12, 25, 23, 59, 59).unwrap();
        let samples = point_timeseries(34.0, -118.0, start, end, 3600, None).unwrap();
        assert_eq!(samples.len(), 24);
    }

    #[test]
    fn grid_snapshot_rejects_empty_grid() {
        let t = Utc.with_ymd_and_hms(2020, 12, 25, 12, 0, 0).unwrap();
        let attrs = GridAttrs { length: 0, width: 10, y0: 0.0, x0: 0.0, dy: -0.01, dx: 0.01 };
        assert!(grid_snapshot(t, &attrs).is_err());
    }

    #[test]
    fn grid_snapshot_fills_every_cell() {
        let t = Utc.with_ymd_and_hms(2020, 12, 25, 14, 7, 44).unwrap();
        let attrs = GridAttrs { length: 4, width: 5, y0: 33.8, x0: -118.2, dy: -0.01, dx: 0.01 };
        let (e, n, u) = grid_snapshot(t, &attrs).unwrap();
        assert_eq!(e.len(), 20);
        assert_eq!(n.len(), 20);
        assert_eq!(u.len(), 20);
        assert!(e.iter().all(|v| v.is_finite()));
    }
}
