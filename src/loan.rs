//! Fixed-rate amortization math.

/// Cost breakdown for a fixed-rate loan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentBreakdown {
    pub loan_amount: f64,
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

/// Level monthly payment via the standard annuity formula:
/// `P · r·(1+r)^n / ((1+r)^n − 1)` with monthly rate `r` and `n` monthly
/// periods. A zero rate degenerates to straight division; the branch is
/// required to avoid 0/0.
pub fn amortize(
    property_price: f64,
    down_payment: f64,
    annual_rate_pct: f64,
    years: u32,
) -> PaymentBreakdown {
    let loan_amount = property_price - down_payment;
    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    let periods = f64::from(years * 12);

    let monthly_payment = if monthly_rate == 0.0 {
        loan_amount / periods
    } else {
        let growth = (1.0 + monthly_rate).powf(periods);
        loan_amount * (monthly_rate * growth) / (growth - 1.0)
    };

    let total_payment = monthly_payment * periods;
    let total_interest = total_payment - loan_amount;

    PaymentBreakdown {
        loan_amount,
        monthly_payment,
        total_payment,
        total_interest,
    }
}
