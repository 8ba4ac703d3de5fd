pub mod url_repository;

pub use url_repository::{UrlListQuery, UrlRepository};

#[cfg(test)]
pub use url_repository::MockUrlRepository;
