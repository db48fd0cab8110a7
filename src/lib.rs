pub mod app;
pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod prompt;

pub use db::TodoStore;
pub use error::StoreError;
