pub mod config;
pub mod estimate;
pub mod price;

pub use config::{Config, PricingConfig};
pub use estimate::*;
pub use price::*;
