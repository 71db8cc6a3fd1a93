pub mod attendance;
pub mod employee;
pub mod log;
