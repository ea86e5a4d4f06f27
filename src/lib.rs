pub mod catalog;
pub mod compare;
pub mod config;
pub mod fetch;
pub mod filter;
pub mod output;
pub mod scoring;
