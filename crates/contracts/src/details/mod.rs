pub mod record;

pub use record::DetailRecord;
