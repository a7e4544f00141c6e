//! Built-in Sun and Moon theory.
//!
//! The Sun uses the low-precision solar theory (mean longitude plus equation
//! of centre, corrected for nutation and aberration), good to about 0.01°.
//! The Moon sums the principal periodic terms of the standard lunar theory
//! for longitude, latitude and distance, good to some tens of arc-seconds,
//! and is then shifted to the observer's topocentric longitude. That is far
//! more than needed to place a tithi or nakshatra boundary within a few
//! minutes.

use super::{EphemerisError, EphemerisProvider, ObserverLocation, Positions, normalize_degrees};
use crate::time_scales::{Tt, Ut};

const J2000: f64 = 2451545.0;
const EARTH_RADIUS_KM: f64 = 6378.14;

/// Multiples of D, M, M′, F and the coefficients of Σl (1e-6 degree) and Σr
/// (1e-3 km).
#[rustfmt::skip]
const LONGITUDE_DISTANCE: &[(i8, i8, i8, i8, f64, f64)] = &[
    (0, 0, 1, 0, 6288774.0, -20905355.0),
    (2, 0, -1, 0, 1274027.0, -3699111.0),
    (2, 0, 0, 0, 658314.0, -2955968.0),
    (0, 0, 2, 0, 213618.0, -569925.0),
    (0, 1, 0, 0, -185116.0, 48888.0),
    (0, 0, 0, 2, -114332.0, -3149.0),
    (2, 0, -2, 0, 58793.0, 246158.0),
    (2, -1, -1, 0, 57066.0, -152138.0),
    (2, 0, 1, 0, 53322.0, -170733.0),
    (2, -1, 0, 0, 45758.0, -204586.0),
    (0, 1, -1, 0, -40923.0, -129620.0),
    (1, 0, 0, 0, -34720.0, 108743.0),
    (0, 1, 1, 0, -30383.0, 104755.0),
    (2, 0, 0, -2, 15327.0, 10321.0),
    (0, 0, 1, 2, -12528.0, 0.0),
    (0, 0, 1, -2, 10980.0, 79661.0),
    (4, 0, -1, 0, 10675.0, -34782.0),
    (0, 0, 3, 0, 10034.0, -23210.0),
    (4, 0, -2, 0, 8548.0, -21636.0),
    (2, 1, -1, 0, -7888.0, 24208.0),
    (2, 1, 0, 0, -6766.0, 30824.0),
    (1, 0, -1, 0, -5163.0, -8379.0),
    (1, 1, 0, 0, 4987.0, -16675.0),
    (2, -1, 1, 0, 4036.0, -12831.0),
    (2, 0, 2, 0, 3994.0, -10445.0),
    (4, 0, 0, 0, 3861.0, -11650.0),
    (2, 0, -3, 0, 3665.0, 14403.0),
    (0, 1, -2, 0, -2689.0, -7003.0),
    (2, 0, -1, 2, -2602.0, 0.0),
    (2, -1, -2, 0, 2390.0, 10056.0),
    (1, 0, 1, 0, -2348.0, 6322.0),
    (2, -2, 0, 0, 2236.0, -9884.0),
    (0, 1, 2, 0, -2120.0, 5751.0),
    (0, 2, 0, 0, -2069.0, 0.0),
    (2, -2, -1, 0, 2048.0, -4950.0),
    (2, 0, 1, -2, -1773.0, 4130.0),
    (2, 0, 0, 2, -1595.0, 0.0),
    (4, -1, -1, 0, 1215.0, -3958.0),
    (0, 0, 2, 2, -1110.0, 0.0),
    (3, 0, -1, 0, -892.0, 3258.0),
    (2, 1, 1, 0, -810.0, 2616.0),
    (4, -1, -2, 0, 759.0, -1897.0),
    (0, 2, -1, 0, -713.0, -2117.0),
    (2, 2, -1, 0, -700.0, 2354.0),
    (2, 1, -2, 0, 691.0, 0.0),
    (2, -1, 0, -2, 596.0, 0.0),
    (4, 0, 1, 0, 549.0, -1423.0),
    (0, 0, 4, 0, 537.0, -1117.0),
    (4, -1, 0, 0, 520.0, -1571.0),
    (1, 0, -2, 0, -487.0, -1739.0),
    (2, 1, 0, -2, -399.0, 0.0),
    (0, 0, 2, -2, -381.0, -4421.0),
    (1, 1, 1, 0, 351.0, 0.0),
    (3, 0, -2, 0, -340.0, 0.0),
    (4, 0, -3, 0, 330.0, 0.0),
    (2, -1, 2, 0, 327.0, 0.0),
    (0, 2, 1, 0, -323.0, 1165.0),
    (1, 1, -1, 0, 299.0, 0.0),
    (2, 0, 3, 0, 294.0, 0.0),
    (2, 0, -1, -2, 0.0, 8752.0),
];

/// Multiples of D, M, M′, F and the coefficient of Σb (1e-6 degree).
#[rustfmt::skip]
const LATITUDE: &[(i8, i8, i8, i8, f64)] = &[
    (0, 0, 0, 1, 5128122.0),
    (0, 0, 1, 1, 280602.0),
    (0, 0, 1, -1, 277693.0),
    (2, 0, 0, -1, 173237.0),
    (2, 0, -1, 1, 55413.0),
    (2, 0, -1, -1, 46271.0),
    (2, 0, 0, 1, 32573.0),
    (0, 0, 2, 1, 17198.0),
    (2, 0, 1, -1, 9266.0),
    (0, 0, 2, -1, 8822.0),
    (2, -1, 0, -1, 8216.0),
    (2, 0, -2, -1, 4324.0),
    (2, 0, 1, 1, 4200.0),
    (2, 1, 0, -1, -3359.0),
    (2, -1, -1, 1, 2463.0),
    (2, -1, 0, 1, 2211.0),
    (2, -1, -1, -1, 2065.0),
    (0, 1, -1, -1, -1870.0),
    (4, 0, -1, -1, 1828.0),
    (0, 1, 0, 1, -1794.0),
    (0, 0, 0, 3, -1749.0),
    (0, 1, -1, 1, -1565.0),
    (1, 0, 0, 1, -1491.0),
    (0, 1, 1, 1, -1475.0),
    (0, 1, 1, -1, -1410.0),
    (0, 1, 0, -1, -1344.0),
    (1, 0, 0, -1, -1335.0),
    (0, 0, 3, 1, 1107.0),
    (4, 0, 0, -1, 1021.0),
    (4, 0, -1, 1, 833.0),
];

/// Geocentric apparent coordinates, degrees and kilometres.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Geocentric {
    pub sun_lon: f64,
    pub moon_lon: f64,
    pub moon_lat: f64,
    pub moon_distance_km: f64,
}

/// The built-in provider. Stateless and infallible.
#[derive(Debug, Copy, Clone, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    /// Geocentric apparent positions at `tt`.
    ///
    /// # Example
    ///
    /// ```
    /// use seva_calendar::astro::AnalyticEphemeris;
    /// use seva_calendar::time_scales::Tt;
    ///
    /// // 1992-10-13 0h TT
    /// let geo = AnalyticEphemeris::geocentric(Tt(2448908.5));
    /// assert!((geo.sun_lon - 199.909).abs() < 0.01);
    /// ```
    pub fn geocentric(tt: Tt) -> Geocentric {
        let t = (tt.0 - J2000) / 36525.0;
        let omega = 125.04452 - 1934.136261 * t;
        let sun_mean_lon = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
        let sun = sun_apparent(t, sun_mean_lon, omega);
        let moon = moon_geometric(t);
        let moon_mean_lon = 218.3164477 + 481267.88123421 * t;
        let nutation = (-17.20 * omega.to_radians().sin()
            - 1.32 * (2.0 * sun_mean_lon).to_radians().sin()
            - 0.23 * (2.0 * moon_mean_lon).to_radians().sin()
            + 0.21 * (2.0 * omega).to_radians().sin())
            / 3600.0;
        Geocentric {
            sun_lon: sun,
            moon_lon: normalize_degrees(moon.0 + nutation),
            moon_lat: moon.1,
            moon_distance_km: moon.2,
        }
    }
}

impl EphemerisProvider for AnalyticEphemeris {
    fn positions(
        &self,
        instant: Ut,
        observer: &ObserverLocation,
    ) -> Result<Positions, EphemerisError> {
        let tt = Tt::from(instant);
        let geo = Self::geocentric(tt);
        let t = (tt.0 - J2000) / 36525.0;
        let moon = topocentric_longitude(&geo, instant, observer, t);
        Ok(Positions {
            sun: geo.sun_lon,
            moon,
        })
    }
}

fn sun_apparent(t: f64, mean_lon: f64, omega: f64) -> f64 {
    let m = (357.52911 + 35999.05029 * t - 0.0001537 * t * t).to_radians();
    let centre = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();
    normalize_degrees(mean_lon + centre - 0.00569 - 0.00478 * omega.to_radians().sin())
}

/// Geometric (longitude, latitude, distance) of the Moon.
fn moon_geometric(t: f64) -> (f64, f64, f64) {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let lp = 218.3164477 + 481267.88123421 * t - 0.0015786 * t2 + t3 / 538841.0 - t4 / 65194000.0;
    let d = 297.8501921 + 445267.1114034 * t - 0.0018819 * t2 + t3 / 545868.0 - t4 / 113065000.0;
    let m = 357.5291092 + 35999.0502909 * t - 0.0001536 * t2 + t3 / 24490000.0;
    let mp = 134.9633964 + 477198.8675055 * t + 0.0087414 * t2 + t3 / 69699.0 - t4 / 14712000.0;
    let f = 93.2720950 + 483202.0175233 * t - 0.0036539 * t2 - t3 / 3526000.0 + t4 / 863310000.0;
    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479264.290 * t;
    let a3 = 313.45 + 481266.484 * t;
    let e = 1.0 - 0.002516 * t - 0.0000074 * t2;

    let (d_r, m_r, mp_r, f_r) = (d.to_radians(), m.to_radians(), mp.to_radians(), f.to_radians());
    let argument = |cd: i8, cm: i8, cmp: i8, cf: i8| {
        cd as f64 * d_r + cm as f64 * m_r + cmp as f64 * mp_r + cf as f64 * f_r
    };
    let eccentricity = |cm: i8| match cm.abs() {
        1 => e,
        2 => e * e,
        _ => 1.0,
    };

    let mut sum_l = 0.0;
    let mut sum_r = 0.0;
    for &(cd, cm, cmp, cf, l, r) in LONGITUDE_DISTANCE {
        let arg = argument(cd, cm, cmp, cf);
        let k = eccentricity(cm);
        sum_l += l * k * arg.sin();
        sum_r += r * k * arg.cos();
    }
    let mut sum_b = 0.0;
    for &(cd, cm, cmp, cf, b) in LATITUDE {
        sum_b += b * eccentricity(cm) * argument(cd, cm, cmp, cf).sin();
    }

    sum_l += 3958.0 * a1.to_radians().sin()
        + 1962.0 * (lp - f).to_radians().sin()
        + 318.0 * a2.to_radians().sin();
    sum_b += -2235.0 * lp.to_radians().sin()
        + 382.0 * a3.to_radians().sin()
        + 175.0 * (a1 - f).to_radians().sin()
        + 175.0 * (a1 + f).to_radians().sin()
        + 127.0 * (lp - mp).to_radians().sin()
        - 115.0 * (lp + mp).to_radians().sin();

    (
        normalize_degrees(lp + sum_l / 1e6),
        sum_b / 1e6,
        385000.56 + sum_r / 1000.0,
    )
}

/// Shifts the Moon's longitude from the geocentre to the observer.
fn topocentric_longitude(geo: &Geocentric, ut: Ut, observer: &ObserverLocation, t: f64) -> f64 {
    let obliquity = (23.439291 - 0.0130042 * t).to_radians();
    let jd = ut.0;
    let tu = (jd - J2000) / 36525.0;
    let gmst = 280.46061837 + 360.98564736629 * (jd - J2000) + 0.000387933 * tu * tu
        - tu * tu * tu / 38710000.0;
    let lst = (gmst + observer.longitude).to_radians();

    let phi = observer.latitude.to_radians();
    let u = (0.99664719 * phi.tan()).atan();
    let rho_sin = 0.99664719 * u.sin();
    let rho_cos = u.cos();

    let sin_pi = EARTH_RADIUS_KM / geo.moon_distance_km;
    let lambda = geo.moon_lon.to_radians();
    let beta = geo.moon_lat.to_radians();

    let n = lambda.cos() * beta.cos() - rho_cos * sin_pi * lst.cos();
    let y = lambda.sin() * beta.cos()
        - sin_pi * (rho_sin * obliquity.sin() + rho_cos * obliquity.cos() * lst.sin());
    normalize_degrees(y.atan2(n).to_degrees())
}
