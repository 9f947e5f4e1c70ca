pub mod comparison;
pub mod upload;
