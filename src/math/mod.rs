//! Numerical core: Black–Scholes pricing, Greek approximations, step grids.

pub mod black_scholes;
pub mod greeks;
pub mod grid;

pub use black_scholes::*;
pub use greeks::*;
pub use grid::*;
