pub mod app;
pub mod cli;
pub mod config;
pub mod filter;
pub mod logging;
pub mod model;
pub mod output;
pub mod score;
pub mod source;
pub mod view;

#[cfg(test)]
mod tests;
