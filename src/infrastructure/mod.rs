//! Infrastructure layer: DTOs and repository implementations.

pub mod dto;
pub mod repository;
