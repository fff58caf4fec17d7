pub mod distributions;
pub mod special;
