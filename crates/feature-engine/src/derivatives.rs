//! Finite-Difference Derivatives

/// Derivatives of a time series, orders 1 through `max_order`
///
/// Order k is the forward first difference of order k-1, so its length
/// shrinks by one per order. A source series with fewer than 2 elements
/// produces an empty series for that order and every order above it.
#[derive(Debug, Clone, Default)]
pub struct DerivativeSet {
    orders: Vec<Vec<f64>>,
}

impl DerivativeSet {
    /// Derivative of the given order (1-based); empty slice if not computed
    pub fn order(&self, order: usize) -> &[f64] {
        if order == 0 || order > self.orders.len() {
            return &[];
        }
        &self.orders[order - 1]
    }

    /// Highest order held in the set
    pub fn max_order(&self) -> usize {
        self.orders.len()
    }
}

/// Forward first difference: `out[i] = series[i+1] - series[i]`
pub fn first_difference(series: &[f64]) -> Vec<f64> {
    series.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Compute finite-difference derivatives up to `max_order`
pub fn derivatives(series: &[f64], max_order: usize) -> DerivativeSet {
    let mut orders = Vec::with_capacity(max_order);
    let mut current = first_difference(series);
    for _ in 1..max_order {
        let next = first_difference(&current);
        orders.push(current);
        current = next;
    }
    if max_order > 0 {
        orders.push(current);
    }
    DerivativeSet { orders }
}
