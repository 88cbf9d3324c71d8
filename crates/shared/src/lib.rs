pub mod directory;
pub mod domain;
pub mod error;
pub mod model;
