pub mod market;
pub mod portfolio;
