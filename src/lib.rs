// Motor controller monitor and relay
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
