pub mod caller;
pub mod constants;
pub mod core;
pub mod events;
pub mod fee;
pub mod token;
