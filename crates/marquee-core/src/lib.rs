pub mod banner;
pub mod catalog;
pub mod config;
pub mod detail;
pub mod error;
pub mod models;
pub mod normalize;
pub mod resolver;
pub mod row;
pub mod trailer;

#[cfg(test)]
mod testing;
