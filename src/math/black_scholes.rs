//! Black–Scholes call pricing, real and complex-spot variants.
//!
//! The complex-spot variant is what makes complex-step differentiation work:
//! we price at `S + ih` and read derivatives off the real/imaginary parts.
//! Everything except the spot stays real, so the normal CDF only needs a
//! first-order extension off the real axis:
//!
//! ```text
//! Φ(zr + i·zi) ≈ Φ(zr) + i·zi·φ(zr)
//! ```
//!
//! which is exact to O(zi²) and all the CS formulas require.

use nalgebra::Complex;

use crate::domain::MarketParams;

const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_68;
const INV_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Standard normal PDF φ(z).
pub fn norm_pdf(z: f64) -> f64 {
    INV_SQRT_2PI * (-0.5 * z * z).exp()
}

/// Standard normal CDF Φ(z).
pub fn norm_cdf(z: f64) -> f64 {
    0.5 * libm::erfc(-z * INV_SQRT_2)
}

/// First-order analytic continuation of Φ for near-real arguments.
fn norm_cdf_complex(z: Complex<f64>) -> Complex<f64> {
    Complex::new(norm_cdf(z.re), z.im * norm_pdf(z.re))
}

/// `d1 = (ln(F/K) + σ²T/2) / (σ√T)`.
///
/// For the real path, `ln(F/K)` switches to `ln_1p((F-K)/K)` when the forward
/// sits within float noise of the strike; at tiny spot bumps the plain
/// quotient loses all significant digits to cancellation.
pub fn d1_real(forward: f64, strike: f64, vol: f64, expiry: f64, sigma_t: f64) -> f64 {
    let ln_f_over_k = if strike > 0.0 {
        let x = (forward - strike) / strike;
        if x.abs() <= 1e-12 {
            x.ln_1p()
        } else {
            (forward / strike).ln()
        }
    } else {
        (forward / strike).ln()
    };

    (ln_f_over_k + 0.5 * vol * vol * expiry) / sigma_t
}

fn d1_complex(forward: Complex<f64>, strike: f64, vol: f64, expiry: f64, sigma_t: f64) -> Complex<f64> {
    ((forward / strike).ln() + 0.5 * vol * vol * expiry) / sigma_t
}

/// European call price at an overridden (possibly bumped) spot.
pub fn call_price(p: &MarketParams, spot: f64) -> f64 {
    let df = (-p.rate * p.expiry).exp();
    let forward = spot * ((p.rate - p.dividend) * p.expiry).exp();
    let sigma_t = p.vol * p.expiry.max(0.0).sqrt();

    if sigma_t == 0.0 {
        return df * (forward - p.strike).max(0.0);
    }

    let d1 = d1_real(forward, p.strike, p.vol, p.expiry, sigma_t);
    let d2 = d1 - sigma_t;

    df * (forward * norm_cdf(d1) - p.strike * norm_cdf(d2))
}

/// European call price at a complex spot (complex-step evaluation).
///
/// The zero-vol branch drops the `max` (not differentiable, and the CS
/// machinery needs the smooth continuation), matching the discounted forward
/// intrinsic value.
pub fn call_price_complex(p: &MarketParams, spot: Complex<f64>) -> Complex<f64> {
    let df = (-p.rate * p.expiry).exp();
    let forward = spot * ((p.rate - p.dividend) * p.expiry).exp();
    let sigma_t = p.vol * p.expiry.max(0.0).sqrt();

    if sigma_t == 0.0 {
        return (forward - p.strike) * df;
    }

    let d1 = d1_complex(forward, p.strike, p.vol, p.expiry, sigma_t);
    let d2 = d1 - sigma_t;

    (forward * norm_cdf_complex(d1) - norm_cdf_complex(d2) * p.strike) * df
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atm_1y() -> MarketParams {
        MarketParams {
            spot: 100.0,
            strike: 100.0,
            rate: 0.0,
            dividend: 0.0,
            vol: 0.20,
            expiry: 1.0,
        }
    }

    #[test]
    fn norm_cdf_at_zero_is_half() {
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
    }

    #[test]
    fn norm_cdf_is_symmetric() {
        for z in [0.1, 0.75, 2.3] {
            assert!((norm_cdf(z) + norm_cdf(-z) - 1.0).abs() < 1e-14);
        }
    }

    #[test]
    fn atm_call_matches_reference_value() {
        // ATM, r=q=0: C = S (Φ(σ√T/2) - Φ(-σ√T/2)) = 100 (2Φ(0.1) - 1) ≈ 7.9656.
        let p = atm_1y();
        let price = call_price(&p, p.spot);
        assert!((price - 7.9656).abs() < 1e-3);
    }

    #[test]
    fn complex_price_on_real_axis_matches_real_price() {
        let p = atm_1y();
        let real = call_price(&p, p.spot);
        let complex = call_price_complex(&p, Complex::new(p.spot, 0.0));
        assert!((complex.re - real).abs() < 1e-12);
        assert_eq!(complex.im, 0.0);
    }

    #[test]
    fn zero_vol_price_is_discounted_intrinsic() {
        let p = MarketParams {
            spot: 110.0,
            strike: 100.0,
            rate: 0.0,
            dividend: 0.0,
            vol: 0.20,
            expiry: 0.0,
        };
        assert!((call_price(&p, p.spot) - 10.0).abs() < 1e-12);

        let otm = MarketParams { spot: 90.0, ..p };
        assert_eq!(call_price(&otm, otm.spot), 0.0);
    }
}
