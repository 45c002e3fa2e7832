//! Delta and Gamma: analytic values, finite-difference and complex-step
//! approximations, and their absolute errors per step size.

use nalgebra::Complex;

use crate::domain::{MarketParams, StepRecord};
use crate::math::black_scholes::{call_price, call_price_complex, d1_real, norm_cdf, norm_pdf};

const INV_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

fn forward_and_sigma_t(p: &MarketParams) -> (f64, f64) {
    let forward = p.spot * ((p.rate - p.dividend) * p.expiry).exp();
    let sigma_t = p.vol * p.expiry.max(0.0).sqrt();
    (forward, sigma_t)
}

/// Closed-form Delta: `e^{-qT} Φ(d1)`.
pub fn delta_analytic(p: &MarketParams) -> f64 {
    let (forward, sigma_t) = forward_and_sigma_t(p);
    let d1 = d1_real(forward, p.strike, p.vol, p.expiry, sigma_t);
    (-p.dividend * p.expiry).exp() * norm_cdf(d1)
}

/// One-sided forward difference, first-order accurate in `h`.
pub fn delta_forward(p: &MarketParams, h: f64) -> f64 {
    let c0 = call_price(p, p.spot);
    let c1 = call_price(p, p.spot + h);
    (c1 - c0) / h
}

/// Complex step: `Im C(S + ih) / h`. No subtraction, so no cancellation.
pub fn delta_complex_step(p: &MarketParams, h: f64) -> f64 {
    let c = call_price_complex(p, Complex::new(p.spot, h));
    c.im / h
}

/// Closed-form Gamma: `e^{-qT} φ(d1) / (S σ√T)`.
pub fn gamma_analytic(p: &MarketParams) -> f64 {
    let (forward, sigma_t) = forward_and_sigma_t(p);
    let d1 = d1_real(forward, p.strike, p.vol, p.expiry, sigma_t);
    (-p.dividend * p.expiry).exp() * norm_pdf(d1) / (p.spot * sigma_t)
}

/// Second-order forward difference `(C(S+2h) - 2C(S+h) + C(S)) / h²`.
pub fn gamma_forward(p: &MarketParams, h: f64) -> f64 {
    let c0 = call_price(p, p.spot);
    let c1 = call_price(p, p.spot + h);
    let c2 = call_price(p, p.spot + 2.0 * h);
    (c2 - 2.0 * c1 + c0) / (h * h)
}

/// Gamma from the real part of one complex-step evaluation:
/// `-2 (Re C(S + ih) - C(S)) / h²`. Still subtractive, but only once.
pub fn gamma_complex_real(p: &MarketParams, h: f64) -> f64 {
    let c_complex = call_price_complex(p, Complex::new(p.spot, h));
    let c_real = call_price(p, p.spot);
    -2.0 * (c_complex.re - c_real) / (h * h)
}

/// Gamma from two complex steps rotated ±45° off the real axis:
/// `(Im C(S + hω) + Im C(S - hω)) / h²` with `ω = e^{iπ/4}`.
///
/// The rotation cancels the even-order terms in the imaginary parts, so this
/// needs no real-valued subtraction at all.
pub fn gamma_complex_45(p: &MarketParams, h: f64) -> f64 {
    let omega = Complex::new(INV_SQRT_2, INV_SQRT_2);
    let spot = Complex::new(p.spot, 0.0);

    let c_plus = call_price_complex(p, spot + omega * h);
    let c_minus = call_price_complex(p, spot - omega * h);

    (c_plus.im + c_minus.im) / (h * h)
}

/// Evaluate every approximation at relative step `h_rel` (so `h = h_rel·S`)
/// and record absolute errors against the analytic Greeks.
pub fn evaluate_step(p: &MarketParams, h_rel: f64) -> StepRecord {
    let h = h_rel * p.spot;

    let delta_analytic_v = delta_analytic(p);
    let delta_fd = delta_forward(p, h);
    let delta_cs = delta_complex_step(p, h);

    let gamma_analytic_v = gamma_analytic(p);
    let gamma_fd = gamma_forward(p, h);
    let gamma_cs_real = gamma_complex_real(p, h);
    let gamma_cs_45 = gamma_complex_45(p, h);

    StepRecord {
        h_rel,
        h,
        delta_analytic: delta_analytic_v,
        delta_fd,
        delta_cs,
        err_d_fd: (delta_fd - delta_analytic_v).abs(),
        err_d_cs: (delta_cs - delta_analytic_v).abs(),
        gamma_analytic: gamma_analytic_v,
        gamma_fd,
        gamma_cs_real,
        gamma_cs_45,
        err_g_fd: (gamma_fd - gamma_analytic_v).abs(),
        err_g_cs_real: (gamma_cs_real - gamma_analytic_v).abs(),
        err_g_cs_45: (gamma_cs_45 - gamma_analytic_v).abs(),
    }
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
    fn analytic_delta_matches_phi_of_d1() {
        // ATM, r=q=0: d1 = σ√T/2 = 0.1, Δ = Φ(0.1) ≈ 0.5398.
        let p = atm_1y();
        assert!((delta_analytic(&p) - 0.5398).abs() < 1e-3);
    }

    #[test]
    fn complex_step_delta_is_near_machine_precision() {
        let p = atm_1y();
        let rec = evaluate_step(&p, 1e-12);
        assert!(rec.err_d_cs < 1e-10, "err_d_cs = {}", rec.err_d_cs);
    }

    #[test]
    fn forward_delta_error_shrinks_with_h_in_truncation_regime() {
        let p = atm_1y();
        let coarse = evaluate_step(&p, 1e-3);
        let fine = evaluate_step(&p, 1e-5);
        assert!(fine.err_d_fd < coarse.err_d_fd);
    }

    #[test]
    fn forward_delta_error_matches_first_order_truncation() {
        // Leading truncation term of the one-sided difference is h·Γ/2.
        let p = atm_1y();
        let rec = evaluate_step(&p, 1e-4);
        let expected = 0.5 * rec.h * gamma_analytic(&p);
        assert!((rec.err_d_fd - expected).abs() < 0.1 * expected);
    }

    #[test]
    fn rotated_complex_gamma_tracks_analytic_value() {
        let p = atm_1y();
        let rec = evaluate_step(&p, 1e-4);
        assert!(rec.err_g_cs_45 < 1e-6, "err_g_cs_45 = {}", rec.err_g_cs_45);
    }

    #[test]
    fn step_record_errors_are_nonnegative() {
        let p = atm_1y();
        for h_rel in [1e-14, 1e-9, 1e-5] {
            let rec = evaluate_step(&p, h_rel);
            assert!(rec.err_d_fd >= 0.0);
            assert!(rec.err_d_cs >= 0.0);
            assert!(rec.err_g_fd >= 0.0);
            assert!(rec.err_g_cs_real >= 0.0);
            assert!(rec.err_g_cs_45 >= 0.0);
        }
    }
}
