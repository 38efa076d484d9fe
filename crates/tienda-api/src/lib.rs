// tienda-api: Async Rust client for the tienda product-catalog REST API

pub mod client;
pub mod error;
pub mod model;
pub mod transport;

pub use client::CatalogClient;
pub use error::Error;
pub use model::{Category, Product, ProductDraft};
pub use transport::TransportConfig;
