pub mod acquisition;
pub mod models;
pub mod provider;
pub mod yahoo;
