//! Derived fields of an open position recomputed on every price tick.
//!
//! Position rows carry: 0 symbol, 1 side, 2 volume, 3 entry price,
//! 5 stop-loss, 6 take-profit. Price, profit and risk/reward are written back
//! into the row by [`super::dom`].

use crate::shared::number_format::{decimal_places, format_fixed, parse_float_prefix};
use contracts::live::PriceTick;

/// Units per standard lot
pub const CONTRACT_SIZE: f64 = 100_000.0;

const MIN_PRICE_DECIMALS: usize = 4;
const MAX_PRICE_DECIMALS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// "Buy", "Buy Limit", "buy stop" are buy-type; anything else sells.
    pub fn from_label(label: &str) -> Self {
        if label.to_lowercase().contains("buy") {
            Side::Buy
        } else {
            Side::Sell
        }
    }
}

/// Risk/reward ratio of a position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiskReward {
    Ratio(f64),
    /// Stop-loss sits exactly at the entry price.
    Unbounded { positive: bool },
    Undefined,
}

impl RiskReward {
    /// (take_profit − entry) / (entry − stop_loss)
    pub fn compute(entry: f64, stop_loss: f64, take_profit: f64) -> Self {
        let reward = take_profit - entry;
        let risk = entry - stop_loss;
        if reward.is_nan() || risk.is_nan() {
            return RiskReward::Undefined;
        }
        if risk == 0.0 {
            return if reward == 0.0 {
                RiskReward::Undefined
            } else {
                RiskReward::Unbounded {
                    positive: reward > 0.0,
                }
            };
        }
        RiskReward::Ratio(reward / risk)
    }

    pub fn display(&self) -> String {
        match self {
            RiskReward::Ratio(r) => format_fixed(*r, 2),
            RiskReward::Unbounded { positive: true } => format_fixed(f64::INFINITY, 2),
            RiskReward::Unbounded { positive: false } => format_fixed(f64::NEG_INFINITY, 2),
            RiskReward::Undefined => format_fixed(f64::NAN, 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionRow {
    pub symbol: String,
    pub side: Side,
    pub volume: f64,
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    /// Decimal places written in the entry cell.
    pub entry_decimals: usize,
}

impl PositionRow {
    /// Read a position from its cell texts. Unparsable numbers become NaN.
    pub fn from_cells<S: AsRef<str>>(cells: &[S]) -> Option<Self> {
        let cell = |i: usize| cells.get(i).map(AsRef::as_ref).unwrap_or("");
        let symbol = cell(0).trim();
        if symbol.is_empty() {
            return None;
        }

        Some(Self {
            symbol: symbol.to_string(),
            side: Side::from_label(cell(1)),
            volume: parse_float_prefix(cell(2)),
            entry: parse_float_prefix(cell(3)),
            stop_loss: parse_float_prefix(cell(5)),
            take_profit: parse_float_prefix(cell(6)),
            entry_decimals: decimal_places(cell(3)),
        })
    }

    /// The price keeps the finer of the entry's and the tick's precision,
    /// within 4..=6 decimals.
    pub fn price_decimals(&self, price: f64) -> usize {
        let tick_decimals = if price.is_finite() {
            decimal_places(&price.to_string())
        } else {
            0
        };
        self.entry_decimals
            .max(tick_decimals)
            .clamp(MIN_PRICE_DECIMALS, MAX_PRICE_DECIMALS)
    }

    pub fn quote(&self, tick: &PriceTick) -> PositionQuote {
        let price = match self.side {
            Side::Buy => tick.bid,
            Side::Sell => tick.ask,
        };
        let profit = match self.side {
            Side::Buy => (price - self.entry) * self.volume * CONTRACT_SIZE,
            Side::Sell => (self.entry - price) * self.volume * CONTRACT_SIZE,
        };

        PositionQuote {
            price,
            price_decimals: self.price_decimals(price),
            rising: tick.is_rising(),
            profit,
            risk_reward: RiskReward::compute(self.entry, self.stop_loss, self.take_profit),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionQuote {
    pub price: f64,
    pub price_decimals: usize,
    pub rising: bool,
    pub profit: f64,
    pub risk_reward: RiskReward,
}

impl PositionQuote {
    pub fn price_text(&self) -> String {
        format_fixed(self.price, self.price_decimals)
    }

    /// Price followed by the trend badge.
    pub fn price_html(&self) -> String {
        let (class, arrow) = if self.rising {
            ("bg-success", "▲")
        } else {
            ("bg-danger", "▼")
        };
        format!(
            r#"{} <span class="badge {}">{}</span>"#,
            self.price_text(),
            class,
            arrow
        )
    }

    pub fn profit_text(&self) -> String {
        format_fixed(self.profit, 2)
    }

    pub fn profit_class(&self) -> &'static str {
        if self.profit >= 0.0 {
            "position-pl text-success"
        } else {
            "position-pl text-danger"
        }
    }

    pub fn risk_reward_text(&self) -> String {
        self.risk_reward.display()
    }
}
