use super::types::{InvalidParameter, SipParameters, SipResult};

pub fn future_value(principal: f64, monthly_rate: f64, months: u32) -> f64 {
    if monthly_rate > 0.0 {
        // Annuity-due: every contribution compounds for a full month, hence
        // the trailing (1 + r) factor.
        let growth = (1.0 + monthly_rate).powi(months as i32);
        principal * ((growth - 1.0) * (1.0 + monthly_rate) / monthly_rate)
    } else {
        principal * months as f64
    }
}

pub fn project(params: &SipParameters) -> Result<SipResult, InvalidParameter> {
    params.validate()?;

    let months = params.months();
    let monthly_rate = params.monthly_rate();

    let total_invested = params.monthly_investment * months as f64;
    let final_value = future_value(params.monthly_investment, monthly_rate, months);
    let gain = final_value - total_invested;

    // Each point is the value of a plan that ran for exactly m months, not a
    // partial accumulation of the full-horizon plan.
    let growth_series = (1..=months)
        .map(|m| future_value(params.monthly_investment, monthly_rate, m))
        .collect();

    Ok(SipResult {
        total_invested,
        final_value,
        gain,
        growth_series,
    })
}
