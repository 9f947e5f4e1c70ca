pub mod entity;
pub mod errors;
pub mod policy;
