pub mod event;
pub mod event_kind;
pub mod location;
pub mod occupancy;
pub mod raw_row;
pub mod session;
