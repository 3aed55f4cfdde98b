pub mod dom;
pub mod quote;

pub use dom::apply_price_update;
pub use quote::{PositionQuote, PositionRow, RiskReward, Side};
