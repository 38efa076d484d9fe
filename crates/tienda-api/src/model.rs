//! Wire types for the product-catalog API.
//!
//! Field names match the backend's JSON verbatim (Spanish, snake_case),
//! so no serde renames are needed apart from the embedded `category`.

use serde::{Deserialize, Deserializer, Serialize};

/// A product classification — from `GET /categoria`.
///
/// Immutable from this client's perspective; categories are created and
/// edited only on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub nombre: String,
}

/// A product record — from `GET /producto`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub nombre: String,
    /// The backend echoes draft submissions, where price travels as a
    /// string, so both `1500` and `"1500.00"` must parse.
    #[serde(deserialize_with = "precio_from_number_or_string")]
    pub precio: f64,
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub categoria_id: u64,
    /// Embedded category, populated by the backend for display. May be
    /// absent; the table renders a placeholder then.
    #[serde(default, rename = "category")]
    pub categoria: Option<Category>,
}

impl Product {
    /// Display name of the embedded category, or the `Sin categoría`
    /// placeholder when the backend did not embed one.
    pub fn categoria_nombre(&self) -> &str {
        self.categoria
            .as_ref()
            .map_or("Sin categoría", |c| c.nombre.as_str())
    }
}

/// Transient draft backing the create/edit form.
///
/// Price and category id are held as text because they back text inputs;
/// they are transmitted verbatim and coerced by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductDraft {
    pub nombre: String,
    pub precio: String,
    pub categoria_id: String,
}

impl ProductDraft {
    /// Project a persisted product back into draft form for editing.
    pub fn from_product(product: &Product) -> Self {
        Self {
            nombre: product.nombre.clone(),
            precio: product.precio.to_string(),
            categoria_id: product.categoria_id.to_string(),
        }
    }

    /// All three fields filled in — the submit precondition.
    pub fn is_complete(&self) -> bool {
        !self.nombre.trim().is_empty()
            && !self.precio.trim().is_empty()
            && !self.categoria_id.trim().is_empty()
    }
}

// ── Lenient numeric deserializers ────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

fn precio_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n as u64),
        NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn product_parses_numeric_precio() {
        let p: Product = serde_json::from_str(
            r#"{"id":7,"nombre":"Widget","precio":19.99,"categoria_id":2}"#,
        )
        .expect("valid product");
        assert_eq!(p.precio, 19.99);
        assert_eq!(p.categoria_id, 2);
        assert!(p.categoria.is_none());
    }

    #[test]
    fn product_parses_string_precio_and_embedded_category() {
        let p: Product = serde_json::from_str(
            r#"{"id":1,"nombre":"Caja","precio":"1500.00","categoria_id":"3",
                "category":{"id":3,"nombre":"Embalaje"}}"#,
        )
        .expect("valid product");
        assert_eq!(p.precio, 1500.0);
        assert_eq!(p.categoria_id, 3);
        assert_eq!(p.categoria_nombre(), "Embalaje");
    }

    #[test]
    fn missing_category_renders_placeholder() {
        let p: Product = serde_json::from_str(
            r#"{"id":2,"nombre":"Suelto","precio":10,"categoria_id":1}"#,
        )
        .expect("valid product");
        assert_eq!(p.categoria_nombre(), "Sin categoría");
    }

    #[test]
    fn draft_from_product_coerces_to_text() {
        let p: Product = serde_json::from_str(
            r#"{"id":7,"nombre":"Widget","precio":19.99,"categoria_id":2}"#,
        )
        .expect("valid product");
        let draft = ProductDraft::from_product(&p);
        assert_eq!(draft.nombre, "Widget");
        assert_eq!(draft.precio, "19.99");
        assert_eq!(draft.categoria_id, "2");
    }

    #[test]
    fn draft_completeness() {
        let mut draft = ProductDraft {
            nombre: "Widget".into(),
            precio: "19.99".into(),
            categoria_id: "2".into(),
        };
        assert!(draft.is_complete());
        draft.precio.clear();
        assert!(!draft.is_complete());
    }
}
