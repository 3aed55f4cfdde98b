pub mod price_tick;
pub mod push_event;

pub use price_tick::{PriceTick, PriceUpdate};
pub use push_event::{PushEvent, StatusUpdate, WebhookReceived};
