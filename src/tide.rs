/*
 * Copyright Contributors to the solid-earth-tide project
 * SPDX-License-Identifier: LGPL-2.1-or-later
 */

//! Solid Earth tide displacement kernel: degree-2/3 body tide plus
//! the frequency-dependent diurnal, semi-diurnal, and long-period
//! corrections of IERS Conventions chapter 7. No permanent-tide
//! subtraction is applied; output is the conventional tide-free
//! displacement delivered by the original formulation.

use crate::geometry::XYZ;
use crate::time::{utc_to_tt, MjdDate};

const H20: f64 = 0.6078;
const L20: f64 = 0.0847;
const H3: f64 = 0.292;
const L3: f64 = 0.015;

const MASS_RATIO_SUN: f64 = 332_945.943_062;
const MASS_RATIO_MOON: f64 = 0.012_300_034;
const RE: f64 = 6_378_136.55;

fn julian_centuries_tt(j_tt: &MjdDate) -> f64 {
    (j_tt.rjd() - 51544.5) / 36525.0
}

/// Degree-2/3 body-tide displacement contribution from one perturbing
/// body (Sun or Moon), in ECEF meters.
fn body_tide(xsta: &XYZ, xbody: &XYZ, mass_ratio: f64, lat_sin2: f64) -> XYZ {
    let r_sta = xsta.norm();
    let r_body = xbody.norm();
    let scs = xsta.dot(xbody) / (r_sta * r_body);

    let h2 = H20 - 0.0006 * (1.0 - 1.5 * lat_sin2);
    let l2 = L20 + 0.0002 * (1.0 - 1.5 * lat_sin2);

    let fac2 = mass_ratio * RE * (RE / r_body).powi(3);
    let fac3 = fac2 * (RE / r_body);

    let p2 = 3.0 * (h2 / 2.0 - l2) * scs * scs - h2 / 2.0;
    let x2 = 3.0 * l2 * scs;
    let p3 = 2.5 * (H3 - 3.0 * L3) * scs.powi(3) + 1.5 * (L3 - H3) * scs;
    let x3 = 1.5 * L3 * (5.0 * scs * scs - 1.0);

    let unit_sta = XYZ::new(xsta.x / r_sta, xsta.y / r_sta, xsta.z / r_sta);
    let unit_body = XYZ::new(xbody.x / r_body, xbody.y / r_body, xbody.z / r_body);

    let deg2 = (unit_sta * (fac2 * p2)) + (unit_body * (fac2 * x2));
    let deg3 = (unit_sta * (fac3 * p3)) + (unit_body * (fac3 * x3));
    deg2 + deg3
}

/// Out-of-phase diurnal correction (h=-0.0025, l=-0.0007), ECEF meters.
fn st1idiu(xsta: &XYZ, xsun: &XYZ, xmon: &XYZ, fac2sun: f64, fac2mon: f64) -> XYZ {
    const DHI: f64 = -0.0025;
    const DLI: f64 = -0.0007;

    let r_sta = xsta.norm();
    let sinphi = xsta.z / r_sta;
    let cosphi = (xsta.x * xsta.x + xsta.y * xsta.y).sqrt() / r_sta;
    let sinlam = xsta.y / (r_sta * cosphi);
    let coslam = xsta.x / (r_sta * cosphi);

    let rsun = xsun.norm();
    let rmon = xmon.norm();

    let dnsun = -DLI * sinphi * cosphi * 2.0 * fac2sun * xsun.z * (xsun.x * sinlam - xsun.y * coslam)
        / rsun.powi(2);
    let dnmon = -DLI * sinphi * cosphi * 2.0 * fac2mon * xmon.z * (xmon.x * sinlam - xmon.y * coslam)
        / rmon.powi(2);

    let desun = DLI * sinphi * sinphi * cosphi * fac2sun * xsun.z
        * (xsun.x * coslam + xsun.y * sinlam) * 2.0 / rsun.powi(2);
    let demon = DLI * sinphi * sinphi * cosphi * fac2mon * xmon.z
        * (xmon.x * coslam + xmon.y * sinlam) * 2.0 / rmon.powi(2);

    let dr_sun = -DHI * sinphi * cosphi * fac2sun * xsun.z * (xsun.x * sinlam - xsun.y * coslam)
        * 2.0 / rsun.powi(2);
    let dr_mon = -DHI * sinphi * cosphi * fac2mon * xmon.z * (xmon.x * sinlam - xmon.y * coslam)
        * 2.0 / rmon.powi(2);

    let dr = dr_sun + dr_mon;
    let dn = dnsun + dnmon;
    let de = desun + demon;

    XYZ::new(
        dr * cosphi * coslam - de * sinlam - dn * sinphi * coslam,
        dr * cosphi * sinlam + de * coslam - dn * sinphi * sinlam,
        dr * sinphi + dn * cosphi,
    )
}

/// Out-of-phase semi-diurnal correction (h=-0.0022, l=-0.0007), ECEF meters.
fn st1isem(xsta: &XYZ, xsun: &XYZ, xmon: &XYZ, fac2sun: f64, fac2mon: f64) -> XYZ {
    const DHI: f64 = -0.0022;
    const DLI: f64 = -0.0007;

    let r_sta = xsta.norm();
    let sinphi = xsta.z / r_sta;
    let cosphi = (xsta.x * xsta.x + xsta.y * xsta.y).sqrt() / r_sta;
    let sinlam = xsta.y / (r_sta * cosphi);
    let coslam = xsta.x / (r_sta * cosphi);
    let costwolam = coslam * coslam - sinlam * sinlam;
    let sintwolam = 2.0 * coslam * sinlam;

    let rsun = xsun.norm();
    let rmon = xmon.norm();

    let dr_sun = DHI * cosphi * cosphi * fac2sun
        * ((xsun.x.powi(2) - xsun.y.powi(2)) * sintwolam - 2.0 * xsun.x * xsun.y * costwolam)
        / rsun.powi(2);
    let dr_mon = DHI * cosphi * cosphi * fac2mon
        * ((xmon.x.powi(2) - xmon.y.powi(2)) * sintwolam - 2.0 * xmon.x * xmon.y * costwolam)
        / rmon.powi(2);

    let dn_sun = -DLI * sinphi * cosphi * fac2sun
        * ((xsun.x.powi(2) - xsun.y.powi(2)) * sintwolam - 2.0 * xsun.x * xsun.y * costwolam)
        / rsun.powi(2);
    let dn_mon = -DLI * sinphi * cosphi * fac2mon
        * ((xmon.x.powi(2) - xmon.y.powi(2)) * sintwolam - 2.0 * xmon.x * xmon.y * costwolam)
        / rmon.powi(2);

    let de_sun = -DLI * sinphi * sinphi * cosphi * fac2sun
        * ((xsun.x.powi(2) - xsun.y.powi(2)) * costwolam + 2.0 * xsun.x * xsun.y * sintwolam)
        / rsun.powi(2);
    let de_mon = -DLI * sinphi * sinphi * cosphi * fac2mon
        * ((xmon.x.powi(2) - xmon.y.powi(2)) * costwolam + 2.0 * xmon.x * xmon.y * sintwolam)
        / rmon.powi(2);

    let dr = dr_sun + dr_mon;
    let dn = dn_sun + dn_mon;
    let de = de_sun + de_mon;

    XYZ::new(
        dr * cosphi * coslam - de * sinlam - dn * sinphi * coslam,
        dr * cosphi * sinlam + de * coslam - dn * sinphi * sinlam,
        dr * sinphi + dn * cosphi,
    )
}

/// Latitude-dependence-of-Love-number correction, ECEF meters.
fn st1l1(xsta: &XYZ, xsun: &XYZ, xmon: &XYZ, fac2sun: f64, fac2mon: f64) -> XYZ {
    const L1D: f64 = 0.0012;
    const L1SD: f64 = 0.0024;

    let r_sta = xsta.norm();
    let sinphi = xsta.z / r_sta;
    let cosphi = (xsta.x * xsta.x + xsta.y * xsta.y).sqrt() / r_sta;
    let sinlam = xsta.y / (r_sta * cosphi);
    let coslam = xsta.x / (r_sta * cosphi);

    let rsun = xsun.norm();
    let rmon = xmon.norm();

    // Diurnal band.
    let l1 = L1D;
    let dnsun = -l1 * sinphi.powi(2) * fac2sun * xsun.z * (xsun.x * coslam + xsun.y * sinlam) / rsun.powi(2);
    let dnmon = -l1 * sinphi.powi(2) * fac2mon * xmon.z * (xmon.x * coslam + xmon.y * sinlam) / rmon.powi(2);
    let desun = l1 * sinphi * (cosphi * cosphi - sinphi * sinphi) * fac2sun * xsun.z
        * (xsun.x * sinlam - xsun.y * coslam) / rsun.powi(2);
    let demon = l1 * sinphi * (cosphi * cosphi - sinphi * sinphi) * fac2mon * xmon.z
        * (xmon.x * sinlam - xmon.y * coslam) / rmon.powi(2);

    let dn_diurnal = dnsun + dnmon;
    let de_diurnal = desun + demon;

    // Semi-diurnal band.
    let l1 = L1SD;
    let costwolam = coslam * coslam - sinlam * sinlam;
    let sintwolam = 2.0 * coslam * sinlam;

    let dnsun = -l1 / 2.0 * sinphi * cosphi * fac2sun
        * ((xsun.x.powi(2) - xsun.y.powi(2)) * costwolam + 2.0 * xsun.x * xsun.y * sintwolam)
        / rsun.powi(2);
    let dnmon = -l1 / 2.0 * sinphi * cosphi * fac2mon
        * ((xmon.x.powi(2) - xmon.y.powi(2)) * costwolam + 2.0 * xmon.x * xmon.y * sintwolam)
        / rmon.powi(2);
    let desun = -l1 / 2.0 * sinphi * sinphi * cosphi * fac2sun
        * ((xsun.x.powi(2) - xsun.y.powi(2)) * sintwolam - 2.0 * xsun.x * xsun.y * costwolam)
        / rsun.powi(2);
    let demon = -l1 / 2.0 * sinphi * sinphi * cosphi * fac2mon
        * ((xmon.x.powi(2) - xmon.y.powi(2)) * sintwolam - 2.0 * xmon.x * xmon.y * costwolam)
        / rmon.powi(2);

    let dn_semi = dnsun + dnmon;
    let de_semi = desun + demon;

    let dn = dn_diurnal + dn_semi;
    let de = de_diurnal + de_semi;

    XYZ::new(-de * sinlam - dn * sinphi * coslam, de * coslam - dn * sinphi * sinlam, dn * cosphi)
}

/// One row of the frequency-dependent diurnal table: Doodson-like
/// multipliers (s, h, p, N', ps) followed by in-phase/out-of-phase
/// radial and transverse amplitudes in millimeters.
struct DiuRow {
    s: f64,
    h: f64,
    p: f64,
    np: f64,
    ps: f64,
    a_ip: f64,
    b_ip: f64,
    a_op: f64,
    b_op: f64,
}

#[rustfmt::skip]
const STEP2DIU_TABLE: [DiuRow; 31] = [
    DiuRow { s: -3.0, h: 0.0, p: 2.0, np: 0.0, ps: 1.0, a_ip: -0.01, b_ip: -0.01, a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: -3.0, h: 2.0, p: 0.0, np: 0.0, ps: 1.0, a_ip: -0.01, b_ip: -0.01, a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: -2.0, h: 0.0, p: 1.0, np: -1.0,ps: 0.0, a_ip: -0.02, b_ip: -0.01, a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: -2.0, h: 0.0, p: 1.0, np: 0.0, ps: 0.0, a_ip: -0.08, b_ip: -0.05, a_op: 0.01,  b_op: 0.01 },
    DiuRow { s: -2.0, h: 2.0, p: -1.0,np: 0.0, ps: 0.0, a_ip: -0.02, b_ip: -0.01, a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: -1.0, h: 0.0, p: 0.0, np: -1.0,ps: 0.0, a_ip: -0.10, b_ip: -0.05, a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: -1.0, h: 0.0, p: 0.0, np: 0.0, ps: 0.0, a_ip: -0.51, b_ip: -0.26, a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: -1.0, h: 2.0, p: 0.0, np: 0.0, ps: 0.0, a_ip: 0.01,  b_ip: 0.0,   a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: 0.0,  h: -2.0,p: 1.0, np: 0.0, ps: 0.0, a_ip: 0.01,  b_ip: 0.0,   a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: 0.0,  h: 0.0, p: -1.0,np: 0.0, ps: 0.0, a_ip: 0.02,  b_ip: 0.01,  a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: 0.0,  h: 0.0, p: 1.0, np: 0.0, ps: 0.0, a_ip: 0.06,  b_ip: 0.02,  a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: 0.0,  h: 0.0, p: 1.0, np: 1.0, ps: 0.0, a_ip: 0.01,  b_ip: 0.0,   a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: 0.0,  h: 2.0, p: -1.0,np: 0.0, ps: 0.0, a_ip: 0.01,  b_ip: 0.0,   a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: 1.0,  h: -3.0,p: 0.0, np: 0.0, ps: 1.0, a_ip: -0.06, b_ip: -0.02, a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: 1.0,  h: -2.0,p: 0.0, np: -1.0,ps: 0.0, a_ip: 0.01,  b_ip: 0.0,   a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: 1.0,  h: -2.0,p: 0.0, np: 0.0, ps: 0.0, a_ip: -1.23, b_ip: -0.05, a_op: 0.06,  b_op: -0.06 },
    DiuRow { s: 1.0,  h: -1.0,p: 0.0, np: 0.0, ps: -1.0,a_ip: 0.02,  b_ip: 0.0,   a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: 1.0,  h: -1.0,p: 0.0, np: 0.0, ps: 1.0, a_ip: 0.04,  b_ip: 0.0,   a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: 1.0,  h: 0.0, p: 0.0, np: -1.0,ps: 0.0, a_ip: -0.22, b_ip: 0.01,  a_op: 0.01,  b_op: 0.0 },
    DiuRow { s: 1.0,  h: 0.0, p: 0.0, np: 0.0, ps: 0.0, a_ip: 12.00, b_ip: -0.80, a_op: -0.67, b_op: -0.03 },
    DiuRow { s: 1.0,  h: 0.0, p: 0.0, np: 1.0, ps: 0.0, a_ip: 1.73,  b_ip: -0.12, a_op: -0.10, b_op: 0.0 },
    DiuRow { s: 1.0,  h: 0.0, p: 1.0, np: 0.0, ps: 0.0, a_ip: -0.04, b_ip: 0.0,   a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: 1.0,  h: 1.0, p: -1.0,np: 0.0, ps: 0.0, a_ip: -0.50, b_ip: -0.01, a_op: 0.03,  b_op: 0.0 },
    DiuRow { s: 1.0,  h: 1.0, p: 0.0, np: 0.0, ps: 0.0, a_ip: 0.01,  b_ip: 0.0,   a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: 1.0,  h: 1.0, p: 1.0, np: 0.0, ps: 0.0, a_ip: -0.01, b_ip: 0.0,   a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: 1.0,  h: 2.0, p: -2.0,np: 0.0, ps: 0.0, a_ip: -0.01, b_ip: 0.0,   a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: 1.0,  h: 2.0, p: 0.0, np: 0.0, ps: 0.0, a_ip: -0.11, b_ip: 0.01,  a_op: 0.01,  b_op: 0.0 },
    DiuRow { s: 2.0,  h: -2.0,p: 1.0, np: 0.0, ps: 0.0, a_ip: -0.01, b_ip: 0.0,   a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: 2.0,  h: 0.0, p: -1.0,np: 0.0, ps: 0.0, a_ip: -0.02, b_ip: 0.02,  a_op: 0.0,   b_op: 0.01 },
    DiuRow { s: 3.0,  h: 0.0, p: 0.0, np: 0.0, ps: 0.0, a_ip: 0.0,   b_ip: 0.01,  a_op: 0.0,   b_op: 0.0 },
    DiuRow { s: 3.0,  h: 0.0, p: 0.0, np: 1.0, ps: 0.0, a_ip: 0.0,   b_ip: 0.01,  a_op: 0.0,   b_op: 0.0 },
];

struct LonRow {
    s: f64,
    h: f64,
    p: f64,
    np: f64,
    ps: f64,
    a_ip: f64,
    b_ip: f64,
    a_op: f64,
    b_op: f64,
}

#[rustfmt::skip]
const STEP2LON_TABLE: [LonRow; 5] = [
    LonRow { s: 0.0, h: 0.0, p: 0.0, np: 1.0, ps: 0.0, a_ip: 0.47, b_ip: 0.23, a_op: 0.16, b_op: 0.07 },
    LonRow { s: 0.0, h: 2.0, p: 0.0, np: 0.0, ps: 0.0, a_ip: -0.20,b_ip: -0.12,a_op: -0.11,b_op: -0.05 },
    LonRow { s: 1.0, h: 0.0, p: -1.0,np: 0.0, ps: 0.0, a_ip: -0.11,b_ip: -0.08,a_op: -0.09,b_op: -0.04 },
    LonRow { s: 2.0, h: 0.0, p: 0.0, np: 0.0, ps: 0.0, a_ip: -0.13,b_ip: -0.11,a_op: -0.15,b_op: -0.07 },
    LonRow { s: 2.0, h: 0.0, p: 0.0, np: 1.0, ps: 0.0, a_ip: -0.05,b_ip: -0.05,a_op: -0.06,b_op: -0.03 },
];

fn fundamental_args(t: f64) -> (f64, f64, f64, f64, f64) {
    let s = 218.316_45 + 481_267.883_42 * t;
    let tau_h = 280.466_5 + 36_000.769_8 * t;
    let p = 83.353_24 + 4_069.013_63 * t;
    let np = 234.955_45 - 1_934.136_19 * t;
    let ps = 282.937_48 + 1.719_57 * t;
    (s, tau_h, p, np, ps)
}

/// Frequency-dependent diurnal correction, ECEF meters.
fn step2diu(xsta: &XYZ, fhr: f64, t: f64) -> XYZ {
    let r_sta = xsta.norm();
    let sinphi = xsta.z / r_sta;
    let cosphi = (xsta.x * xsta.x + xsta.y * xsta.y).sqrt() / r_sta;
    let cosla = xsta.x / (r_sta * cosphi);
    let sinla = xsta.y / (r_sta * cosphi);
    let zla = sinla.atan2(cosla);

    let (s, h, p, np, ps) = fundamental_args(t);

    let mut dr = 0.0;
    let mut dn = 0.0;
    let mut de = 0.0;

    for row in STEP2DIU_TABLE.iter() {
        let tau = fhr * 15.0 + h - s;
        let theta_deg =
            tau + row.s * s + row.h * h + row.p * p + row.np * np + row.ps * ps;
        let theta = theta_deg.to_radians();
        let arg = theta + zla;

        dr += row.a_ip * 2.0 * sinphi * cosphi * arg.sin() + row.b_ip * 2.0 * sinphi * cosphi * arg.cos();
        dn += row.a_op * (cosphi * cosphi - sinphi * sinphi) * arg.sin()
            + row.b_op * (cosphi * cosphi - sinphi * sinphi) * arg.cos();
        de += row.a_op * sinphi * arg.cos() - row.b_op * sinphi * arg.sin();
    }

    let dr = dr / 1000.0;
    let dn = dn / 1000.0;
    let de = de / 1000.0;

    XYZ::new(
        dr * cosphi * cosla - de * sinla - dn * sinphi * cosla,
        dr * cosphi * sinla + de * cosla - dn * sinphi * sinla,
        dr * sinphi + dn * cosphi,
    )
}

/// Frequency-dependent long-period correction, ECEF meters.
fn step2lon(xsta: &XYZ, t: f64) -> XYZ {
    let r_sta = xsta.norm();
    let sinphi = xsta.z / r_sta;
    let cosphi = (xsta.x * xsta.x + xsta.y * xsta.y).sqrt() / r_sta;
    let cosla = xsta.x / (r_sta * cosphi);
    let sinla = xsta.y / (r_sta * cosphi);

    let (s, h, p, np, ps) = fundamental_args(t);

    let mut dr = 0.0;
    let mut dn = 0.0;

    for row in STEP2LON_TABLE.iter() {
        let theta_deg = row.s * s + row.h * h + row.p * p + row.np * np + row.ps * ps;
        let theta = theta_deg.to_radians();

        dr += row.a_ip * (3.0 * sinphi * sinphi - 1.0) / 2.0 * theta.cos()
            + row.a_op * (3.0 * sinphi * sinphi - 1.0) / 2.0 * theta.sin();
        dn += row.b_ip * sinphi * cosphi * 2.0 * theta.cos()
            + row.b_op * sinphi * cosphi * 2.0 * theta.sin();
    }

    let dr = dr / 1000.0;
    let dn = dn / 1000.0;

    XYZ::new(
        dr * cosphi * cosla - dn * sinphi * cosla,
        dr * cosphi * sinla - dn * sinphi * sinla,
        dr * sinphi + dn * cosphi,
    )
}

/// Full solid Earth tide displacement at a station, ECEF meters.
/// `xsta` is the station ECEF position, `j_utc` the evaluation
/// instant, `xsun`/`xmoon` the geocentric ECEF body positions at
/// that instant.
pub fn detide(xsta: &XYZ, j_utc: &MjdDate, xsun: &XYZ, xmoon: &XYZ) -> XYZ {
    let j_tt = utc_to_tt(j_utc);
    let t = julian_centuries_tt(&j_tt);
    let fhr = j_tt.fmjd * 24.0;

    let r_sta = xsta.norm();
    let lat_sin2 = (xsta.z / r_sta).powi(2);

    let fac2sun = MASS_RATIO_SUN * RE * (RE / xsun.norm()).powi(3);
    let fac2mon = MASS_RATIO_MOON * RE * (RE / xmoon.norm()).powi(3);

    let mut dxtide = body_tide(xsta, xsun, MASS_RATIO_SUN, lat_sin2) + body_tide(xsta, xmoon, MASS_RATIO_MOON, lat_sin2);

    dxtide = dxtide + st1idiu(xsta, xsun, xmoon, fac2sun, fac2mon);
    dxtide = dxtide + st1isem(xsta, xsun, xmoon, fac2sun, fac2mon);
    dxtide = dxtide + st1l1(xsta, xsun, xmoon, fac2sun, fac2mon);
    dxtide = dxtide + step2diu(xsta, fhr, t);
    dxtide = dxtide + step2lon(xsta, t);

    dxtide
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::llh_to_ecef;
    use crate::geometry::LLH;
    use crate::time::civil_to_mjd;
    use crate::time::CivDate;
    use crate::ephemeris::{moon_ecef, sun_ecef};

    #[test]
    fn detide_is_small_and_finite() {
        let llh = LLH::new(34.0_f64.to_radians(), (-118.0_f64).to_radians(), 0.0);
        let xsta = llh_to_ecef(&llh);
        let c = CivDate::new(2020, 12, 25, 12, 0, 0.0);
        let j = civil_to_mjd(&c);
        let xsun = sun_ecef(&j);
        let xmon = moon_ecef(&j);
        let d = detide(&xsta, &j, &xsun, &xmon);
        assert!(d.norm() < 1.0);
        assert!(d.x.is_finite() && d.y.is_finite() && d.z.is_finite());
    }
}
