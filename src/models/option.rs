use crate::error::Result;
use crate::utils::{require_finite, require_positive};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

/// Contract terms shared by every cell of a heatmap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContractParams {
    /// Strike price X
    pub strike: f64,
    /// Time to maturity T in years
    pub maturity: f64,
    /// Continuously compounded risk-free rate r (decimal)
    pub rate: f64,
}

impl ContractParams {
    pub fn new(strike: f64, maturity: f64, rate: f64) -> Self {
        Self {
            strike,
            maturity,
            rate,
        }
    }

    /// Strike and maturity must be strictly positive, the rate finite.
    pub fn validate(&self) -> Result<()> {
        require_positive("strike", self.strike)?;
        require_positive("maturity", self.maturity)?;
        require_finite("rate", self.rate)
    }

    /// Present value of the strike, `X * exp(-rT)`.
    pub fn discounted_strike(&self) -> f64 {
        self.strike * (-self.rate * self.maturity).exp()
    }
}
