//! Statutory gross-to-net split applied by the payroll service.

use serde::Serialize;

/// Employee social security contribution.
pub const CNSS_RATE: f64 = 0.0918;
/// Flat income tax rate used by the payroll service.
pub const IRPP_RATE: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NetBreakdown {
    pub net: f64,
    pub cnss: f64,
    pub irpp: f64,
}

/// Same computation as the payroll service, each figure rounded to cents.
/// Only used to label estimates; never substituted for unknown amounts.
pub fn net_from_gross(gross: f64) -> NetBreakdown {
    let cnss = gross * CNSS_RATE;
    let irpp = gross * IRPP_RATE;
    NetBreakdown {
        net: round_cents(gross - cnss - irpp),
        cnss: round_cents(cnss),
        irpp: round_cents(irpp),
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_payroll_service_figures() {
        let split = net_from_gross(1000.0);
        assert_eq!(split.cnss, 91.8);
        assert_eq!(split.irpp, 50.0);
        assert_eq!(split.net, 858.2);
    }
}
