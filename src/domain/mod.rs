//! Domain layer: entities, value objects, and ports

pub mod entities;
pub mod ports;
pub mod value_objects;
