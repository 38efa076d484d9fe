// Hand-crafted async HTTP client for the product-catalog backend.
//
// Base path: /api/ (e.g. http://127.0.0.1:8000/api)
// No auth, no pagination — the contract is five operations, each a single
// HTTP call with no retry and no caching.

use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::model::{Category, Product, ProductDraft};
use crate::transport::TransportConfig;

/// Async client for the catalog API.
///
/// Cheap to clone; the underlying `reqwest::Client` is an `Arc` internally.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base URL ends with a single trailing slash so relative
    /// joins like `producto` resolve under it rather than replacing the
    /// last path segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    // ── HTTP plumbing ────────────────────────────────────────────────

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&ProductDraft>,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("{method} {url}");

        let mut req = self.http.request(method, url);
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let raw = resp.text().await?;

        if status.is_success() {
            serde_json::from_str(&raw).map_err(|e| {
                let preview: String = raw.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body: raw.clone(),
                }
            })
        } else {
            Err(Error::Status {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
            })
        }
    }

    /// Like [`request`](Self::request), but the response body is only an
    /// acknowledgement the caller never inspects.
    async fn request_ack(
        &self,
        method: Method,
        path: &str,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("{method} {url}");

        let resp = self.http.request(method, url).send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            let raw = resp.text().await.unwrap_or_default();
            Err(Error::Status {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
            })
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// `GET /producto` — the full product list.
    pub async fn list_products(&self) -> Result<Vec<Product>, Error> {
        self.request(Method::GET, "producto", None).await
    }

    /// `GET /categoria` — the full category list.
    pub async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        self.request(Method::GET, "categoria", None).await
    }

    /// `POST /producto` — create from a draft. Returns the created
    /// representation; callers typically only care that it succeeded.
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product, Error> {
        self.request(Method::POST, "producto", Some(draft)).await
    }

    /// `PUT /producto/actualizar/{id}` — update an existing product.
    pub async fn update_product(&self, id: u64, draft: &ProductDraft) -> Result<Product, Error> {
        self.request(Method::PUT, &format!("producto/actualizar/{id}"), Some(draft))
            .await
    }

    /// `DELETE /producto/eliminar/{id}` — delete a product. The body is a
    /// deletion acknowledgement this client does not inspect.
    pub async fn delete_product(&self, id: u64) -> Result<(), Error> {
        self.request_ack(Method::DELETE, &format!("producto/eliminar/{id}"))
            .await
    }
}
