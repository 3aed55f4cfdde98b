pub mod controller;
pub mod model;

pub use controller::{FilterControls, TableManager, TableOptions};
pub use model::{FilterState, PageState, ViewPlan, DEFAULT_PAGE_SIZE};
