pub mod instrument;
pub mod portfolio;
pub mod transaction;
