pub mod guest_types;
pub mod models;
pub mod ports;
pub mod services;
pub mod wristband;
