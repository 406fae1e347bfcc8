//! Business logic services

pub mod simulation;
