pub mod catalog;
pub mod config;
pub mod console;
pub mod error;
pub mod presentation;
pub mod quiz;
pub mod selector;
pub mod speech;
