pub mod jornada;
pub mod model;
pub mod platform;
pub mod shift;
pub mod timestamp;
