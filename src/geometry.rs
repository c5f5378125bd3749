/*
 * Copyright Contributors to the solid-earth-tide project
 * SPDX-License-Identifier: LGPL-2.1-or-later
 */

//! GRS80 geodesy and the elementary axis rotations the ephemeris and
//! tide kernel build on.

use std::ops::{Add, Mul, Sub};

/// GRS80 semi-major axis, meters.
pub const ELLP_A: f64 = 6378137.0;
/// GRS80 first eccentricity squared.
pub const ELLP_E2: f64 = 6.694_380_022_903_415_74e-3;

/// A Cartesian 3-vector. Interpreted by the caller as ECEF,
/// topocentric ENU, or a unit direction depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct XYZ {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl XYZ {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        XYZ { x, y, z }
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn dot(&self, other: &XYZ) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Active rotation about the x-axis by `theta` radians.
    pub fn rot1(&self, theta: f64) -> XYZ {
        let (s, c) = theta.sin_cos();
        XYZ::new(self.x, c * self.y + s * self.z, c * self.z - s * self.y)
    }

    /// Active rotation about the z-axis by `theta` radians.
    pub fn rot3(&self, theta: f64) -> XYZ {
        let (s, c) = theta.sin_cos();
        XYZ::new(c * self.x + s * self.y, c * self.y - s * self.x, self.z)
    }
}

impl Add for XYZ {
    type Output = XYZ;
    fn add(self, rhs: XYZ) -> XYZ {
        XYZ::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for XYZ {
    type Output = XYZ;
    fn sub(self, rhs: XYZ) -> XYZ {
        XYZ::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for XYZ {
    type Output = XYZ;
    fn mul(self, s: f64) -> XYZ {
        XYZ::new(self.x * s, self.y * s, self.z * s)
    }
}

/// Geodetic coordinates on the GRS80 ellipsoid. `lat`/`lon` are
/// radians, `hte` meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LLH {
    pub lat: f64,
    pub lon: f64,
    pub hte: f64,
}

impl LLH {
    pub const fn new(lat: f64, lon: f64, hte: f64) -> Self {
        LLH { lat, lon, hte }
    }

    /// GRS80 forward transform: geodetic -> ECEF Cartesian.
    pub fn to_ecef(&self) -> XYZ {
        llh_to_ecef(self)
    }
}

/// GRS80 forward transform: geodetic -> ECEF Cartesian.
pub fn llh_to_ecef(llh: &LLH) -> XYZ {
    let (sin_lat, cos_lat) = llh.lat.sin_cos();
    let (sin_lon, cos_lon) = llh.lon.sin_cos();
    let n = ELLP_A / (1.0 - ELLP_E2 * sin_lat * sin_lat).sqrt();
    XYZ::new(
        (n + llh.hte) * cos_lat * cos_lon,
        (n + llh.hte) * cos_lat * sin_lon,
        (n * (1.0 - ELLP_E2) + llh.hte) * sin_lat,
    )
}

/// Expresses an ECEF vector in the local east/north/up frame at
/// `llh`. The returned [`XYZ`] packs `.x` = north, `.y` = east,
/// `.z` = up; unpack accordingly at call sites (this matches the
/// station-frame convention used throughout the tide kernel).
pub fn ecef_to_enu(v: &XYZ, llh: &LLH) -> XYZ {
    let (sin_lat, cos_lat) = llh.lat.sin_cos();
    let (sin_lon, cos_lon) = llh.lon.sin_cos();

    let north = -sin_lat * cos_lon * v.x - sin_lat * sin_lon * v.y + cos_lat * v.z;
    let east = -sin_lon * v.x + cos_lon * v.y;
    let up = cos_lat * cos_lon * v.x + cos_lat * sin_lon * v.y + sin_lat * v.z;

    XYZ::new(north, east, up)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rot3_then_inverse_is_identity() {
        let v = XYZ::new(1.0, 2.0, 3.0);
        let back = v.rot3(0.7).rot3(-0.7);
        assert_abs_diff_eq!(back.x, v.x, epsilon = 1e-12);
        assert_abs_diff_eq!(back.y, v.y, epsilon = 1e-12);
        assert_abs_diff_eq!(back.z, v.z, epsilon = 1e-12);
    }

    #[test]
    fn rot1_then_inverse_is_identity() {
        let v = XYZ::new(1.0, -2.0, 0.5);
        let back = v.rot1(1.1).rot1(-1.1);
        assert_abs_diff_eq!(back.x, v.x, epsilon = 1e-12);
        assert_abs_diff_eq!(back.y, v.y, epsilon = 1e-12);
        assert_abs_diff_eq!(back.z, v.z, epsilon = 1e-12);
    }

    #[test]
    fn sea_level_point_lies_on_ellipsoid() {
        let llh = LLH::new(34.0_f64.to_radians(), (-118.0_f64).to_radians(), 0.0);
        let v = llh_to_ecef(&llh);
        let (sin_lat, _) = llh.lat.sin_cos();
        let expected_n = ELLP_A / (1.0 - ELLP_E2 * sin_lat * sin_lat).sqrt();
        assert_abs_diff_eq!(v.norm(), expected_n, epsilon = 1.0);
    }
}
