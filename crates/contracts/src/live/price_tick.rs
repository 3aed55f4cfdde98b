use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Quote for one symbol in a `price_update` event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTick {
    pub bid: f64,
    pub ask: f64,
    /// Signed move since the position was opened; only its sign is displayed.
    #[serde(default)]
    pub change: f64,
}

impl PriceTick {
    /// Trend arrow shown next to the price: up for a non-negative change.
    pub fn is_rising(&self) -> bool {
        self.change >= 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceUpdate {
    #[serde(default)]
    pub prices: BTreeMap<String, PriceTick>,
}

impl PriceUpdate {
    pub fn tick_for(&self, symbol: &str) -> Option<&PriceTick> {
        self.prices.get(symbol)
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
