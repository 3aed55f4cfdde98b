//! Wire types shared between the trading server and the browser dashboard.

pub mod details;
pub mod live;
