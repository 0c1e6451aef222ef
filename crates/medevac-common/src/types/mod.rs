//! Core data types for the MEDEVAC doctrine service

pub mod casualty;
pub mod scenario;
pub mod strategy;
