pub mod axis;
mod black_scholes;
mod plotting;
pub mod statistics;

pub use black_scholes::*;
pub use plotting::*;
