pub mod aggregate;
pub mod log;
pub mod logic;
pub mod parser;
pub mod reconcile;
