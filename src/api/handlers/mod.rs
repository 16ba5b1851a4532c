pub mod bulk_update;
pub mod guest;
pub mod health;
