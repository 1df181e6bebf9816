pub mod error;
pub mod estimate;
pub mod health;
pub mod openapi;
