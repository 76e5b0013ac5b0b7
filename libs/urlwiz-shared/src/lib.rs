pub mod models;
pub mod search_form;
pub mod unlock;
pub mod view;

pub use models::{DomainSearchResult, Listing, Skeleton};
