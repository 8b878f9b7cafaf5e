pub mod employee;
pub mod event;
pub mod overrides;
pub mod position;
pub mod resolved;
