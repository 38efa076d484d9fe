//! Application controller — owns the state, the action channel, and the
//! main event loop.
//!
//! All mutation flows through [`Action`]s. Network calls run in spawned
//! tasks that report back over the same channel, so the loop never blocks
//! on the backend.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, warn};

use tienda_api::{CatalogClient, ProductDraft};

use crate::action::{Action, ConfirmAction, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::form::ProductForm;
use crate::table::ProductTable;
use crate::theme;
use crate::tui::Tui;

const TICK_RATE: Duration = Duration::from_millis(250);
const RENDER_RATE: Duration = Duration::from_millis(33);
const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Which pane owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Form,
    Table,
}

/// Modal layer drawn over the panes. At most one at a time; it captures
/// all keyboard input while open.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Overlay {
    Confirm(ConfirmAction),
    Help,
}

pub struct App {
    client: CatalogClient,
    api_url: String,

    running: bool,
    /// True only during the initial dual fetch; the whole screen shows a
    /// spinner while set. Later re-fetches update in place.
    loading: bool,
    /// True while a create/update/delete round-trip is in flight. Guards
    /// against overlapping mutations.
    busy: bool,
    focus: Pane,
    /// The product being edited, if the form is in edit mode.
    editing: Option<u64>,
    overlay: Option<Overlay>,
    notification: Option<(Notification, Instant)>,
    throbber_state: ThrobberState,

    form: ProductForm,
    table: ProductTable,

    action_tx: UnboundedSender<Action>,
    action_rx: UnboundedReceiver<Action>,
}

impl App {
    pub fn new(client: CatalogClient, api_url: String) -> Self {
        let (action_tx, action_rx) = unbounded_channel();
        let mut table = ProductTable::new();
        table.set_focused(true);

        Self {
            client,
            api_url,
            running: true,
            loading: true,
            busy: false,
            focus: Pane::Table,
            editing: None,
            overlay: None,
            notification: None,
            throbber_state: ThrobberState::default(),
            form: ProductForm::new(),
            table,
            action_tx,
            action_rx,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let mut events = EventReader::new(TICK_RATE, RENDER_RATE);
        self.action_tx.send(Action::Reload)?;

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => self.handle_key_event(key)?,
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => {}
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;
            }

            if matches!(event, Event::Render) {
                tui.draw(|frame| self.render(frame))?;
            }
        }

        events.stop();
        tui.exit()?;
        Ok(())
    }

    // ── Key routing ─────────────────────────────────────────────────

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Ctrl+C always quits, whatever is on screen
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.action_tx.send(Action::Quit)?;
            return Ok(());
        }

        match self.overlay {
            Some(Overlay::Confirm(_)) => {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                        self.action_tx.send(Action::ConfirmYes)?;
                    }
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                        self.action_tx.send(Action::ConfirmNo)?;
                    }
                    _ => {}
                }
                return Ok(());
            }
            Some(Overlay::Help) => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                    self.action_tx.send(Action::ToggleHelp)?;
                }
                return Ok(());
            }
            None => {}
        }

        if self.loading {
            if key.code == KeyCode::Char('q') {
                self.action_tx.send(Action::Quit)?;
            }
            return Ok(());
        }

        match self.focus {
            Pane::Form => {
                if let Some(action) = self.form.handle_key_event(key)? {
                    self.action_tx.send(action)?;
                }
            }
            Pane::Table => match key.code {
                KeyCode::Char('q') => self.action_tx.send(Action::Quit)?,
                KeyCode::Char('?') => self.action_tx.send(Action::ToggleHelp)?,
                KeyCode::Tab | KeyCode::Char('a') => self.action_tx.send(Action::FocusForm)?,
                _ => {
                    if let Some(action) = self.table.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
            },
        }

        Ok(())
    }

    // ── Action dispatch ─────────────────────────────────────────────

    fn process_action(&mut self, action: &Action) -> Result<()> {
        // Panes see every action; they may emit follow-ups
        if let Some(follow_up) = self.form.update(action)? {
            self.action_tx.send(follow_up)?;
        }
        if let Some(follow_up) = self.table.update(action)? {
            self.action_tx.send(follow_up)?;
        }

        match action {
            Action::Quit => self.running = false,
            Action::Tick => self.tick(),
            Action::Render | Action::Resize(_, _) => {}

            Action::FocusForm => self.set_focus(Pane::Form),

            Action::Reload => {
                let client = self.client.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(fetch_all(client, tx));
            }
            Action::ReloadProducts => {
                let client = self.client.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(fetch_products(client, tx));
            }
            Action::DataLoaded { products, categories } => {
                debug!(
                    products = products.len(),
                    categories = categories.len(),
                    "catalog loaded"
                );
                self.loading = false;
            }
            Action::ProductsLoaded(products) => {
                debug!(products = products.len(), "product list refreshed");
            }
            Action::LoadFailed(err) => {
                warn!(%err, "catalog fetch failed");
                self.loading = false;
                self.notify(Notification::error("Error al cargar los datos"));
            }

            Action::SubmitDraft(draft) => {
                if self.busy {
                    debug!("submit ignored, another operation is in flight");
                } else {
                    self.busy = true;
                    let client = self.client.clone();
                    let tx = self.action_tx.clone();
                    tokio::spawn(submit_draft(client, self.editing, draft.clone(), tx));
                }
            }
            Action::SubmitFinished(Ok(message)) => {
                self.busy = false;
                self.editing = None;
                self.notify(Notification::success(message.clone()));
                self.set_focus(Pane::Table);
                self.action_tx.send(Action::Reload)?;
            }
            Action::SubmitFinished(Err(err)) => {
                warn!(%err, "create/update failed");
                self.busy = false;
                self.notify(Notification::error("Error al procesar la operación"));
            }
            Action::EditProduct(product) => {
                self.editing = Some(product.id);
                self.set_focus(Pane::Form);
            }
            Action::CancelEdit => {
                self.editing = None;
                self.set_focus(Pane::Table);
            }

            Action::RequestDelete(product) => {
                if !self.busy {
                    self.action_tx.send(Action::ShowConfirm(ConfirmAction::DeleteProduct {
                        id: product.id,
                        nombre: product.nombre.clone(),
                    }))?;
                }
            }
            Action::ShowConfirm(confirm) => {
                self.overlay = Some(Overlay::Confirm(confirm.clone()));
            }
            Action::ConfirmYes => {
                if let Some(Overlay::Confirm(ConfirmAction::DeleteProduct { id, .. })) =
                    self.overlay.take()
                {
                    self.busy = true;
                    let client = self.client.clone();
                    let tx = self.action_tx.clone();
                    tokio::spawn(delete_product(client, id, tx));
                }
            }
            Action::ConfirmNo => self.overlay = None,
            Action::DeleteFinished(Ok(message)) => {
                self.busy = false;
                self.notify(Notification::success(message.clone()));
                self.action_tx.send(Action::ReloadProducts)?;
            }
            Action::DeleteFinished(Err(err)) => {
                warn!(%err, "delete failed");
                self.busy = false;
                self.notify(Notification::error("Error al eliminar el producto"));
            }

            Action::ToggleHelp => {
                self.overlay = match self.overlay {
                    Some(Overlay::Help) => None,
                    _ => Some(Overlay::Help),
                };
            }
        }

        Ok(())
    }

    fn tick(&mut self) {
        if self.loading || self.busy {
            self.throbber_state.calc_next();
        }
        if let Some((_, shown_at)) = self.notification {
            if shown_at.elapsed() >= TOAST_DURATION {
                self.notification = None;
            }
        }
    }

    fn set_focus(&mut self, pane: Pane) {
        self.focus = pane;
        self.form.set_focused(pane == Pane::Form);
        self.table.set_focused(pane == Pane::Table);
    }

    fn notify(&mut self, notification: Notification) {
        self.notification = Some((notification, Instant::now()));
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render(&mut self, frame: &mut Frame) {
        if self.loading {
            self.render_loading(frame);
            return;
        }

        let layout = Layout::vertical([
            Constraint::Length(1), // header
            Constraint::Length(8), // form
            Constraint::Min(5),    // table
            Constraint::Length(1), // status bar
        ])
        .split(frame.area());

        frame.render_widget(
            Paragraph::new(Span::styled(
                " Tienda — Gestión de Productos",
                theme::title_style(),
            )),
            layout[0],
        );

        self.form.render(frame, layout[1]);
        self.table.render(frame, layout[2]);
        self.render_status_bar(frame, layout[3]);

        if let Some((ref notification, _)) = self.notification {
            render_toast(frame, notification);
        }
        match self.overlay {
            Some(Overlay::Confirm(ref confirm)) => render_confirm(frame, confirm),
            Some(Overlay::Help) => render_help(frame),
            None => {}
        }
    }

    fn render_loading(&mut self, frame: &mut Frame) {
        let area = centered_rect(frame.area(), 30, 3);
        let throbber = Throbber::default()
            .label("Cargando datos...")
            .style(Style::default().fg(theme::AMBER))
            .throbber_set(throbber_widgets_tui::BRAILLE_SIX);
        frame.render_stateful_widget(throbber, area, &mut self.throbber_state);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            format!(" {} ", self.api_url),
            Style::default().fg(theme::BORDER_GRAY),
        )];
        if self.busy {
            spans.push(Span::styled(
                "● guardando...",
                Style::default().fg(theme::WARN_YELLOW),
            ));
        }
        spans.push(Span::styled("  ? ", theme::key_hint_key()));
        spans.push(Span::styled("ayuda  ", theme::key_hint()));
        spans.push(Span::styled("q ", theme::key_hint_key()));
        spans.push(Span::styled("salir", theme::key_hint()));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

}

fn render_confirm(frame: &mut Frame, confirm: &ConfirmAction) {
    let area = centered_rect(frame.area(), 56, 5);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Confirmar ")
        .title_style(Style::default().fg(theme::WARN_YELLOW))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::WARN_YELLOW));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            confirm.to_string(),
            Style::default().fg(theme::DIM_WHITE),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("y ", theme::key_hint_key()),
            Span::styled("sí   ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("no", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(Text::from(lines)).centered(), inner);
}

fn render_toast(frame: &mut Frame, notification: &Notification) {
    let width = (notification.message.len() as u16 + 4).min(frame.area().width);
    let area = Rect::new(
        frame.area().width.saturating_sub(width + 1),
        1,
        width,
        3,
    );
    frame.render_widget(Clear, area);

    let color = match notification.level {
        NotificationLevel::Success => theme::SUCCESS_GREEN,
        NotificationLevel::Error => theme::ERROR_RED,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));
    frame.render_widget(
        Paragraph::new(Span::styled(
            notification.message.clone(),
            Style::default().fg(color),
        ))
        .centered()
        .block(block),
        area,
    );
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(frame.area(), 44, 14);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Atajos ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let entry = |k: &str, desc: &str| {
        Line::from(vec![
            Span::styled(format!("  {k:<8}"), theme::key_hint_key()),
            Span::styled(desc.to_string(), theme::key_hint()),
        ])
    };
    let lines = vec![
        entry("j/k ↑/↓", "mover selección"),
        entry("e/Enter", "editar producto"),
        entry("d", "eliminar producto"),
        entry("a/Tab", "nuevo producto"),
        entry("r", "recargar catálogo"),
        Line::default(),
        entry("Tab", "siguiente campo (formulario)"),
        entry("Enter", "guardar (formulario)"),
        entry("Esc", "cancelar (formulario)"),
        Line::default(),
        entry("?", "ayuda"),
        entry("q", "salir"),
    ];
    frame.render_widget(Paragraph::new(Text::from(lines)), inner);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

// ── Background tasks ────────────────────────────────────────────────
//
// Each task reports back over the action channel; send failures mean the
// app is shutting down and are deliberately ignored.

async fn fetch_all(client: CatalogClient, tx: UnboundedSender<Action>) {
    match tokio::try_join!(client.list_products(), client.list_categories()) {
        Ok((products, categories)) => {
            let _ = tx.send(Action::DataLoaded { products, categories });
        }
        Err(err) => {
            let _ = tx.send(Action::LoadFailed(err.to_string()));
        }
    }
}

async fn fetch_products(client: CatalogClient, tx: UnboundedSender<Action>) {
    match client.list_products().await {
        Ok(products) => {
            let _ = tx.send(Action::ProductsLoaded(products));
        }
        Err(err) => {
            let _ = tx.send(Action::LoadFailed(err.to_string()));
        }
    }
}

async fn submit_draft(
    client: CatalogClient,
    editing: Option<u64>,
    draft: ProductDraft,
    tx: UnboundedSender<Action>,
) {
    let result = match editing {
        Some(id) => client
            .update_product(id, &draft)
            .await
            .map(|_| "Producto actualizado exitosamente".to_string()),
        None => client
            .create_product(&draft)
            .await
            .map(|_| "Producto agregado exitosamente".to_string()),
    };
    let _ = tx.send(Action::SubmitFinished(result.map_err(|err| err.to_string())));
}

async fn delete_product(client: CatalogClient, id: u64, tx: UnboundedSender<Action>) {
    let result = client
        .delete_product(id)
        .await
        .map(|()| "Producto eliminado exitosamente".to_string());
    let _ = tx.send(Action::DeleteFinished(result.map_err(|err| err.to_string())));
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tienda_api::{Product, TransportConfig};
    use tokio::sync::mpsc::error::TryRecvError;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_app(url: &str) -> App {
        let client = CatalogClient::new(url, &TransportConfig::default()).expect("client");
        App::new(client, url.to_string())
    }

    fn widget() -> Product {
        serde_json::from_value(json!({
            "id": 7,
            "nombre": "Widget",
            "precio": 19.99,
            "categoria_id": 2,
        }))
        .expect("valid product")
    }

    #[tokio::test]
    async fn edit_action_sets_edit_state_and_focuses_the_form() {
        let mut app = test_app("http://127.0.0.1:9/api");
        app.loading = false;

        app.process_action(&Action::EditProduct(widget())).expect("action");

        assert_eq!(app.editing, Some(7));
        assert_eq!(app.focus, Pane::Form);
        assert_eq!(app.form.draft().precio, "19.99");
        assert_eq!(app.form.draft().categoria_id, "2");
    }

    #[tokio::test]
    async fn cancel_edit_returns_focus_and_clears_edit_state() {
        let mut app = test_app("http://127.0.0.1:9/api");
        app.loading = false;

        app.process_action(&Action::EditProduct(widget())).expect("action");
        app.process_action(&Action::CancelEdit).expect("action");

        assert_eq!(app.editing, None);
        assert_eq!(app.focus, Pane::Table);
        assert_eq!(app.form.draft(), &ProductDraft::default());
        assert!(!app.form.edit_mode());
    }

    #[tokio::test]
    async fn declined_confirmation_changes_nothing() {
        let mut app = test_app("http://127.0.0.1:9/api");
        app.loading = false;
        app.process_action(&Action::ProductsLoaded(vec![widget()]))
            .expect("action");

        app.process_action(&Action::RequestDelete(widget())).expect("action");
        let confirm = app.action_rx.try_recv().expect("queued confirm");
        app.process_action(&confirm).expect("action");
        assert!(matches!(app.overlay, Some(Overlay::Confirm(_))));

        app.process_action(&Action::ConfirmNo).expect("action");

        assert!(app.overlay.is_none());
        assert!(!app.busy);
        assert_eq!(app.table.len(), 1);
        assert!(
            matches!(app.action_rx.try_recv(), Err(TryRecvError::Empty)),
            "no network task was spawned"
        );
    }

    #[tokio::test]
    async fn load_failure_clears_loading_and_raises_a_toast() {
        let mut app = test_app("http://127.0.0.1:9/api");
        assert!(app.loading);

        app.process_action(&Action::LoadFailed("connection refused".into()))
            .expect("action");

        assert!(!app.loading);
        let (notification, _) = app.notification.as_ref().expect("toast");
        assert_eq!(notification.level, NotificationLevel::Error);
        assert_eq!(notification.message, "Error al cargar los datos");
    }

    #[tokio::test]
    async fn toast_expires_after_three_seconds() {
        let mut app = test_app("http://127.0.0.1:9/api");
        app.notify(Notification::success("listo"));
        app.notification = app
            .notification
            .take()
            .map(|(n, _)| (n, Instant::now() - Duration::from_secs(4)));

        app.tick();

        assert!(app.notification.is_none());
    }

    #[tokio::test]
    async fn finished_submit_resets_the_form_and_queues_a_reload() {
        let mut app = test_app("http://127.0.0.1:9/api");
        app.loading = false;
        app.busy = true;
        app.process_action(&Action::EditProduct(widget())).expect("action");

        app.process_action(&Action::SubmitFinished(Ok(
            "Producto actualizado exitosamente".into(),
        )))
        .expect("action");

        assert!(!app.busy);
        assert_eq!(app.editing, None);
        assert_eq!(app.focus, Pane::Table);
        assert_eq!(app.form.draft(), &ProductDraft::default());
        let (notification, _) = app.notification.as_ref().expect("toast");
        assert_eq!(notification.level, NotificationLevel::Success);
        assert!(matches!(app.action_rx.try_recv(), Ok(Action::Reload)));
    }

    #[tokio::test]
    async fn busy_guard_ignores_a_second_submit() {
        let mut app = test_app("http://127.0.0.1:9/api");
        app.loading = false;
        app.busy = true;

        app.process_action(&Action::SubmitDraft(ProductDraft {
            nombre: "Widget".into(),
            precio: "19.99".into(),
            categoria_id: "2".into(),
        }))
        .expect("action");

        assert!(matches!(app.action_rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn submit_in_edit_mode_updates_instead_of_creating() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/producto/actualizar/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7,
                "nombre": "Widget",
                "precio": "25.00",
                "categoria_id": "2",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CatalogClient::new(&format!("{}/api", server.uri()), &TransportConfig::default())
            .expect("client");
        let (tx, mut rx) = unbounded_channel();
        let draft = ProductDraft {
            nombre: "Widget".into(),
            precio: "25.00".into(),
            categoria_id: "2".into(),
        };

        submit_draft(client, Some(7), draft, tx).await;

        match rx.recv().await {
            Some(Action::SubmitFinished(Ok(msg))) => {
                assert_eq!(msg, "Producto actualizado exitosamente");
            }
            other => panic!("expected SubmitFinished(Ok), got {other:?}"),
        }
    }

    #[tokio::test]
    async fn submit_without_edit_state_creates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/producto"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 9,
                "nombre": "Cinta",
                "precio": "1500",
                "categoria_id": "1",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CatalogClient::new(&format!("{}/api", server.uri()), &TransportConfig::default())
            .expect("client");
        let (tx, mut rx) = unbounded_channel();
        let draft = ProductDraft {
            nombre: "Cinta".into(),
            precio: "1500".into(),
            categoria_id: "1".into(),
        };

        submit_draft(client, None, draft, tx).await;

        match rx.recv().await {
            Some(Action::SubmitFinished(Ok(msg))) => {
                assert_eq!(msg, "Producto agregado exitosamente");
            }
            other => panic!("expected SubmitFinished(Ok), got {other:?}"),
        }
    }

    #[tokio::test]
    async fn confirmed_delete_refetches_products_only() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/producto/eliminar/7"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"mensaje": "Producto eliminado"})),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/producto"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let mut app = test_app(&format!("{}/api", server.uri()));
        app.loading = false;
        app.process_action(&Action::ShowConfirm(ConfirmAction::DeleteProduct {
            id: 7,
            nombre: "Widget".into(),
        }))
        .expect("action");

        app.process_action(&Action::ConfirmYes).expect("action");
        assert!(app.busy);
        assert!(app.overlay.is_none());

        let finished = app.action_rx.recv().await.expect("delete result");
        match &finished {
            Action::DeleteFinished(Ok(msg)) => {
                assert_eq!(msg, "Producto eliminado exitosamente");
            }
            other => panic!("expected DeleteFinished(Ok), got {other:?}"),
        }
        app.process_action(&finished).expect("action");

        assert!(!app.busy);
        let (notification, _) = app.notification.as_ref().expect("toast");
        assert_eq!(notification.level, NotificationLevel::Success);
        // Categories are not re-fetched after a delete
        assert!(matches!(
            app.action_rx.try_recv(),
            Ok(Action::ReloadProducts)
        ));
    }

    #[tokio::test]
    async fn initial_load_fills_both_panes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/producto"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 1,
                "nombre": "Cinta",
                "precio": 1500,
                "categoria_id": 1,
                "category": {"id": 1, "nombre": "Embalaje"},
            }])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/categoria"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"id": 1, "nombre": "Embalaje"}])),
            )
            .mount(&server)
            .await;

        let mut app = test_app(&format!("{}/api", server.uri()));
        app.process_action(&Action::Reload).expect("action");

        let loaded = app.action_rx.recv().await.expect("load result");
        match &loaded {
            Action::DataLoaded { products, categories } => {
                assert_eq!(products.len(), 1);
                assert_eq!(categories.len(), 1);
            }
            other => panic!("expected DataLoaded, got {other:?}"),
        }
        app.process_action(&loaded).expect("action");

        assert!(!app.loading);
        assert_eq!(app.table.len(), 1);
    }
}
