// Application layer - Use cases and data access seams
pub mod curve_service;
pub mod turbine_repository;
