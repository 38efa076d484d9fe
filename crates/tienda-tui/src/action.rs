//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;

use tienda_api::{Category, Product, ProductDraft};

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }
}

/// Pending confirmation action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteProduct { id: u64, nombre: String },
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteProduct { nombre, .. } => {
                write!(f, "¿Eliminar {nombre}? Esta acción no se puede deshacer.")
            }
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Pane focus ────────────────────────────────────────────────
    FocusForm,

    // ── Fetch pipeline ────────────────────────────────────────────
    /// Re-fetch products and categories concurrently.
    Reload,
    /// Re-fetch the product list only (after a delete).
    ReloadProducts,
    DataLoaded {
        products: Vec<Product>,
        categories: Vec<Category>,
    },
    ProductsLoaded(Vec<Product>),
    LoadFailed(String),

    // ── Form flow ─────────────────────────────────────────────────
    SubmitDraft(ProductDraft),
    /// Outcome of a create/update round-trip. `Ok` carries the success
    /// message for the toast.
    SubmitFinished(Result<String, String>),
    EditProduct(Product),
    CancelEdit,

    // ── Delete flow ───────────────────────────────────────────────
    RequestDelete(Product),
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,
    DeleteFinished(Result<String, String>),

    // ── Help overlay ──────────────────────────────────────────────
    ToggleHelp,
}
