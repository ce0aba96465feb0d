use rust_decimal::Decimal;
use serde::Serialize;

/// Outcome of the hard minimum-order check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityOutcome {
    pub valid: bool,
    /// User-facing explanation when `valid` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl EligibilityOutcome {
    fn eligible() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }
}

/// Rejects orders whose subtotal is below `least_order_value`.
///
/// Runs before any fee is computed. Unlike the small-order surcharge this
/// blocks the order instead of adding a fee.
#[must_use]
pub fn check_minimum_order(subtotal: Decimal, least_order_value: Decimal) -> EligibilityOutcome {
    if subtotal >= least_order_value {
        return EligibilityOutcome::eligible();
    }

    let shortfall = (least_order_value - subtotal).normalize();
    let minimum = least_order_value.normalize();
    tracing::debug!(%subtotal, %minimum, "order below least order value");
    EligibilityOutcome {
        valid: false,
        message: Some(format!(
            "Minimum order value is {minimum}. Add {shortfall} more to place this order."
        )),
    }
}
