//! Transverse Mercator on an ellipsoid, used for UTM zones.
//!
//! Uses the Krüger n-series (4th order), which is accurate to well under a
//! millimetre within a UTM zone. Vector point data arrives in ETRS89 / UTM
//! zone 30N (EPSG:25830): GRS80 ellipsoid, central meridian 3°W,
//! scale 0.9996, false easting 500 km.

use std::f64::consts::PI;

use overlay_common::OverlayResult;

use crate::{check_finite, check_latitude, Projection};

/// GRS80 semi-major axis (meters)
pub const GRS80_A: f64 = 6378137.0;
/// GRS80 inverse flattening
pub const GRS80_INV_F: f64 = 298.257222101;

const UTM_SCALE: f64 = 0.9996;
const UTM_FALSE_EASTING: f64 = 500000.0;
const UTM_FALSE_NORTHING_SOUTH: f64 = 10000000.0;

/// Transverse Mercator projection parameters and precomputed series.
#[derive(Debug, Clone)]
pub struct TransverseMercator {
    /// Central meridian in radians
    pub lon0: f64,
    /// Scale factor on the central meridian
    pub k0: f64,
    pub false_easting: f64,
    pub false_northing: f64,
    /// First eccentricity
    e: f64,
    /// Rectifying radius
    big_a: f64,
    alpha: [f64; 4],
    beta: [f64; 4],
    delta: [f64; 4],
}

impl TransverseMercator {
    /// Build a projection for an ellipsoid given by semi-major axis and
    /// inverse flattening.
    pub fn new(
        a: f64,
        inv_f: f64,
        lon0_deg: f64,
        k0: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let f = 1.0 / inv_f;
        let n = f / (2.0 - f);
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;

        let big_a = a / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0);

        let alpha = [
            n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0,
            13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0,
            61.0 * n3 / 240.0 - 103.0 * n4 / 140.0,
            49561.0 * n4 / 161280.0,
        ];
        let beta = [
            n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0 - n4 / 360.0,
            n2 / 48.0 + n3 / 15.0 - 437.0 * n4 / 1440.0,
            17.0 * n3 / 480.0 - 37.0 * n4 / 840.0,
            4397.0 * n4 / 161280.0,
        ];
        let delta = [
            2.0 * n - 2.0 * n2 / 3.0 - 2.0 * n3 + 116.0 * n4 / 45.0,
            7.0 * n2 / 3.0 - 8.0 * n3 / 5.0 - 227.0 * n4 / 45.0,
            56.0 * n3 / 15.0 - 136.0 * n4 / 35.0,
            4279.0 * n4 / 630.0,
        ];

        Self {
            lon0: lon0_deg.to_radians(),
            k0,
            false_easting,
            false_northing,
            e: (f * (2.0 - f)).sqrt(),
            big_a,
            alpha,
            beta,
            delta,
        }
    }

    /// UTM zone on the GRS80 ellipsoid.
    pub fn utm(zone: u8, north: bool) -> Self {
        let lon0 = -183.0 + 6.0 * f64::from(zone);
        let false_northing = if north { 0.0 } else { UTM_FALSE_NORTHING_SOUTH };
        Self::new(
            GRS80_A,
            GRS80_INV_F,
            lon0,
            UTM_SCALE,
            UTM_FALSE_EASTING,
            false_northing,
        )
    }

    /// ETRS89 / UTM zone 30N (EPSG:25830).
    pub fn etrs89_utm30n() -> Self {
        Self::utm(30, true)
    }

    fn normalize_dlon(&self, lon: f64) -> f64 {
        let mut dlon = lon - self.lon0;
        while dlon > PI {
            dlon -= 2.0 * PI;
        }
        while dlon < -PI {
            dlon += 2.0 * PI;
        }
        dlon
    }
}

impl Projection for TransverseMercator {
    fn project(&self, lon: f64, lat: f64) -> OverlayResult<(f64, f64)> {
        check_latitude(lon, lat)?;

        let phi = lat.to_radians();
        let dlon = self.normalize_dlon(lon.to_radians());
        let sin_phi = phi.sin();

        // Conformal latitude, as tan()
        let t = (sin_phi.atanh() - self.e * (self.e * sin_phi).atanh()).sinh();
        let xi_p = t.atan2(dlon.cos());
        let eta_p = (dlon.sin() / (1.0 + t * t).sqrt()).atanh();

        let mut xi = xi_p;
        let mut eta = eta_p;
        for (j, a) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            xi += a * (k * xi_p).sin() * (k * eta_p).cosh();
            eta += a * (k * xi_p).cos() * (k * eta_p).sinh();
        }

        let x = self.false_easting + self.k0 * self.big_a * eta;
        let y = self.false_northing + self.k0 * self.big_a * xi;
        Ok((x, y))
    }

    fn unproject(&self, x: f64, y: f64) -> OverlayResult<(f64, f64)> {
        check_finite(x, y)?;

        let xi = (y - self.false_northing) / (self.k0 * self.big_a);
        let eta = (x - self.false_easting) / (self.k0 * self.big_a);

        let mut xi_p = xi;
        let mut eta_p = eta;
        for (j, b) in self.beta.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            xi_p -= b * (k * xi).sin() * (k * eta).cosh();
            eta_p -= b * (k * xi).cos() * (k * eta).sinh();
        }

        let chi = (xi_p.sin() / eta_p.cosh()).asin();
        let mut phi = chi;
        for (j, d) in self.delta.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            phi += d * (k * chi).sin();
        }
        let lon = self.lon0 + eta_p.sinh().atan2(xi_p.cos());

        Ok((lon.to_degrees(), phi.to_degrees()))
    }
}
