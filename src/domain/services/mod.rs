pub mod admission;
pub mod bulk_update;
pub mod reservation_gate;
pub mod revocation;
