use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid parameter: {0}")]
pub struct InvalidParameter(pub String);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SipParameters {
    pub monthly_investment: f64,
    pub annual_return_percent: f64,
    pub years: u32,
}

impl SipParameters {
    pub fn months(&self) -> u32 {
        self.years * 12
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_return_percent / 100.0 / 12.0
    }

    pub fn validate(&self) -> Result<(), InvalidParameter> {
        if !self.monthly_investment.is_finite() || self.monthly_investment <= 0.0 {
            return Err(InvalidParameter(
                "monthly_investment must be a finite amount > 0".to_string(),
            ));
        }
        if !self.annual_return_percent.is_finite() || self.annual_return_percent < 0.0 {
            return Err(InvalidParameter(
                "annual_return_percent must be a finite rate >= 0".to_string(),
            ));
        }
        if self.years < 1 {
            return Err(InvalidParameter("years must be >= 1".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SipResult {
    pub total_invested: f64,
    pub final_value: f64,
    pub gain: f64,
    pub growth_series: Vec<f64>,
}
