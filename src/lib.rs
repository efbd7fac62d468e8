// Wind turbine power-curve explorer: CSV-backed data service and terminal viewer
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
