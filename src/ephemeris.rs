/*
 * Copyright Contributors to the solid-earth-tide project
 * SPDX-License-Identifier: LGPL-2.1-or-later
 */

//! Low-precision geocentric Sun and Moon ephemerides, both returned
//! in ECEF. Neither consults a planetary ephemeris file: both are
//! closed-form series good to the accuracy the tide kernel needs,
//! after Montenbruck & Pfleger, "Astronomy on the Personal
//! Computer", 4th ed., section 3.2.

use crate::geometry::XYZ;
use crate::time::{greenwich_hour_angle, utc_to_tt, MjdDate};

const OBLIQUITY_DEG: f64 = 23.439_291_11;

fn julian_centuries_tt(j_tt: &MjdDate) -> f64 {
    (j_tt.rjd() - 51544.5) / 36525.0
}

/// Geocentric Sun position, ECEF, meters.
pub fn sun_ecef(j_utc: &MjdDate) -> XYZ {
    let j_tt = utc_to_tt(j_utc);
    let t = julian_centuries_tt(&j_tt);
    let obe = OBLIQUITY_DEG.to_radians();
    let opod = 282.940_0;

    let em_deg = 357.525_6 + 35999.049 * t;
    let em = em_deg.to_radians();

    let r = (149.619 - 2.499 * em.cos() - 0.021 * (2.0 * em).cos()) * 1.0e9;

    let slond = opod
        + em_deg
        + (6892.0 * em.sin() + 72.0 * (2.0 * em).sin()) / 3600.0
        + 1.3972 * t;
    let slon = slond.to_radians();

    let (sin_slon, cos_slon) = slon.sin_cos();
    let (sin_obe, cos_obe) = obe.sin_cos();

    let v = XYZ::new(r * cos_slon, r * sin_slon * cos_obe, r * sin_slon * sin_obe);
    let ghar = greenwich_hour_angle(j_utc);
    v.rot3(ghar)
}

/// Geocentric Moon position, ECEF, meters. Truncated MiniMoon series:
/// 14 longitude terms, 8 latitude terms, 8 distance terms.
pub fn moon_ecef(j_utc: &MjdDate) -> XYZ {
    let j_tt = utc_to_tt(j_utc);
    let t = julian_centuries_tt(&j_tt);
    let obe = OBLIQUITY_DEG.to_radians();

    let el0 = (218.316_45 + 481_267.883_42 * t).rem_euclid(360.0);
    let el = (134.963_98 + 477_198.867_53 * t).rem_euclid(360.0);
    let elp = (357.529_11 + 35_999.050_29 * t).rem_euclid(360.0);
    let f = (93.272_09 + 483_202.017_53 * t).rem_euclid(360.0);
    let d = (297.850_20 + 445_267.111_48 * t).rem_euclid(360.0);

    let (el_r, elp_r, f_r, d_r) =
        (el.to_radians(), elp.to_radians(), f.to_radians(), d.to_radians());

    let selond = el0
        + 6.288_75 * el_r.sin()
        + 1.274_02 * (2.0 * d_r - el_r).sin()
        + 0.658_53 * (2.0 * d_r).sin()
        + 0.213_62 * (2.0 * el_r).sin()
        - 0.185_86 * elp_r.sin()
        - 0.114_33 * (2.0 * f_r).sin()
        + 0.058_84 * (2.0 * d_r - 2.0 * el_r).sin()
        + 0.057_36 * (2.0 * d_r - elp_r - el_r).sin()
        + 0.021_06 * (2.0 * d_r - elp_r).sin()
        - 0.018_51 * (d_r + elp_r - el_r).sin()
        + 0.010_70 * (d_r).sin()
        + 0.009_85 * (elp_r + el_r).sin()
        - 0.009_31 * (2.0 * f_r - el_r).sin()
        - 0.000_48 * (el_r - elp_r).sin();

    let selatd = 5.128_19 * f_r.sin()
        + 0.280_61 * (el_r + f_r).sin()
        + 0.277_17 * (el_r - f_r).sin()
        + 0.176_56 * (2.0 * d_r - f_r).sin()
        + 0.055_62 * (2.0 * d_r - el_r + f_r).sin()
        - 0.053_29 * (2.0 * d_r - el_r - f_r).sin()
        - 0.049_55 * (2.0 * d_r - 2.0 * f_r).sin()
        + 0.004_62 * (2.0 * d_r - 2.0 * el_r + f_r).sin();

    let rse = 385_000.56
        - 20_905.36 * el_r.cos()
        - 3699.11 * (2.0 * d_r - el_r).cos()
        - 2955.97 * (2.0 * d_r).cos()
        - 569.93 * (2.0 * el_r).cos()
        - 246.56 * (2.0 * d_r - 2.0 * el_r).cos()
        + 153.17 * (2.0 * d_r - elp_r - el_r).cos()
        - 152.14 * (d_r + elp_r).cos()
        - 129.62 * (d_r - elp_r).cos();

    let rse_m = rse * 1000.0;
    let slatd = selatd.to_radians();
    let slond = selond.to_radians();

    let (sin_slatd, cos_slatd) = slatd.sin_cos();
    let (sin_slond, cos_slond) = slond.sin_cos();

    let v = XYZ::new(
        rse_m * cos_slond * cos_slatd,
        rse_m * sin_slond * cos_slatd,
        rse_m * sin_slatd,
    );

    let ghar = greenwich_hour_angle(j_utc);
    v.rot1(-obe).rot3(ghar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::CivDate;
    use crate::time::civil_to_mjd;

    #[test]
    fn sun_distance_is_about_one_au() {
        let c = CivDate::new(2020, 12, 25, 12, 0, 0.0);
        let j = civil_to_mjd(&c);
        let v = sun_ecef(&j);
        assert!(v.norm() > 1.47e11 && v.norm() < 1.52e11);
    }

    #[test]
    fn moon_distance_is_about_385000km() {
        let c = CivDate::new(2020, 12, 25, 12, 0, 0.0);
        let j = civil_to_mjd(&c);
        let v = moon_ecef(&j);
        assert!(v.norm() > 3.56e8 && v.norm() < 4.07e8);
    }
}
