pub mod local;
pub mod target;
