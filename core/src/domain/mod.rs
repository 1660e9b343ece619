//! Domain layer: entities and read-boundary projections

pub mod entities;
pub mod value_objects;
