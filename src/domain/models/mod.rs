pub mod activity_log;
pub mod exhibition;
pub mod guest;
pub mod operator;
pub mod reservation;
pub mod term;
