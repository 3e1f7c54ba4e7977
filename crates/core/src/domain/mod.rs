pub mod outfit;
pub mod profile;
pub mod style;
pub mod weather;
