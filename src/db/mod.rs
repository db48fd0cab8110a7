pub mod filter;
pub mod repository;

pub use repository::TodoStore;
