pub mod chain;
pub mod clients;
pub mod harness;
pub mod scenario;
