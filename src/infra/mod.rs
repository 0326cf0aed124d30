pub mod file_catalog;
pub mod http_client;

pub use file_catalog::FileCatalog;
pub use http_client::HttpApi;
