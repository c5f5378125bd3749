/*
 * Copyright Contributors to the solid-earth-tide project
 * SPDX-License-Identifier: LGPL-2.1-or-later
 */

use thiserror::Error;

/// Failures produced at the driver boundary. The kernel itself
/// (`tide::detide` and friends) is total on well-formed input and
/// never returns one of these.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SolidTideError {
    #[error("latitude {lat_deg} deg is not in (-90, 90)")]
    InvalidLatitude { lat_deg: f64 },

    #[error("longitude {lon_deg} deg is not in (-360, 360)")]
    InvalidLongitude { lon_deg: f64 },

    #[error("year {year} is not in (1901, 2099)")]
    InvalidYear { year: i32 },

    #[error("invalid grid: {reason}")]
    InvalidGrid { reason: &'static str },

    #[error("step_sec {step_sec} must be positive and divide 86400")]
    InvalidStep { step_sec: i64 },
}

pub type Result<T> = std::result::Result<T, SolidTideError>;
