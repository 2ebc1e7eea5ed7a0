pub mod calculate;
pub mod session;
