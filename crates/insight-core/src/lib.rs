pub mod ports;
pub mod event_bus;
pub mod controller;
pub mod archive;
pub mod suggestions;
