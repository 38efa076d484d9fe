//! Product table pane.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use tienda_api::Product;

use crate::action::Action;
use crate::component::Component;
use crate::money::fmt_precio;
use crate::theme;

pub struct ProductTable {
    focused: bool,
    products: Vec<Product>,
    state: TableState,
}

impl ProductTable {
    pub fn new() -> Self {
        Self {
            focused: false,
            products: Vec::new(),
            state: TableState::default(),
        }
    }

    pub fn selected(&self) -> Option<&Product> {
        self.state.selected().and_then(|i| self.products.get(i))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    fn select_next(&mut self) {
        if self.products.is_empty() {
            return;
        }
        let next = match self.state.selected() {
            Some(i) if i + 1 < self.products.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.state.select(Some(next));
    }

    fn select_prev(&mut self) {
        if self.products.is_empty() {
            return;
        }
        let prev = self.state.selected().map_or(0, |i| i.saturating_sub(1));
        self.state.select(Some(prev));
    }

    fn select_first(&mut self) {
        if !self.products.is_empty() {
            self.state.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        if !self.products.is_empty() {
            self.state.select(Some(self.products.len() - 1));
        }
    }

    /// Replace the rows, keeping the cursor on a valid line.
    fn set_products(&mut self, products: &[Product]) {
        self.products = products.to_vec();
        let selected = match self.state.selected() {
            _ if self.products.is_empty() => None,
            Some(i) => Some(i.min(self.products.len() - 1)),
            None => Some(0),
        };
        self.state.select(selected);
    }
}

impl Component for ProductTable {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Char('g') | KeyCode::Home => self.select_first(),
            KeyCode::Char('G') | KeyCode::End => self.select_last(),
            KeyCode::Char('r') => return Ok(Some(Action::Reload)),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(product) = self.selected() {
                    return Ok(Some(Action::EditProduct(product.clone())));
                }
            }
            KeyCode::Char('d') => {
                if let Some(product) = self.selected() {
                    return Ok(Some(Action::RequestDelete(product.clone())));
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::DataLoaded { products, .. } | Action::ProductsLoaded(products) => {
                self.set_products(products);
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" Productos ({}) ", self.products.len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.products.is_empty() {
            frame.render_widget(
                Paragraph::new(Text::styled(
                    "\nNo hay productos registrados",
                    theme::table_row(),
                ))
                .centered(),
                inner,
            );
            return;
        }

        let layout =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        let header = Row::new(["ID", "Nombre", "Precio", "Categoría"])
            .style(theme::table_header())
            .bottom_margin(1);

        let rows = self.products.iter().map(|p| {
            Row::new(vec![
                Cell::from(p.id.to_string()),
                Cell::from(p.nombre.clone()),
                Cell::from(fmt_precio(p.precio)),
                Cell::from(p.categoria_nombre().to_string()),
            ])
            .style(theme::table_row())
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Min(20),
                Constraint::Length(12),
                Constraint::Min(14),
            ],
        )
        .header(header)
        .row_highlight_style(theme::table_selected())
        .highlight_symbol("▸ ");

        let mut state = self.state.clone();
        frame.render_stateful_widget(table, layout[0], &mut state);

        let hints = Line::from(vec![
            Span::styled(" j/k ", theme::key_hint_key()),
            Span::styled("mover  ", theme::key_hint()),
            Span::styled("e ", theme::key_hint_key()),
            Span::styled("editar  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("eliminar  ", theme::key_hint()),
            Span::styled("a ", theme::key_hint_key()),
            Span::styled("agregar  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("recargar", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn products(n: u64) -> Vec<Product> {
        (1..=n)
            .map(|id| {
                serde_json::from_str(&format!(
                    r#"{{"id":{id},"nombre":"Producto {id}","precio":10,"categoria_id":1}}"#
                ))
                .expect("valid product")
            })
            .collect()
    }

    #[test]
    fn first_row_is_selected_after_load() {
        let mut table = ProductTable::new();
        table
            .update(&Action::ProductsLoaded(products(3)))
            .expect("update");
        assert_eq!(table.selected().map(|p| p.id), Some(1));
    }

    #[test]
    fn selection_is_clamped_when_rows_shrink() {
        let mut table = ProductTable::new();
        table
            .update(&Action::ProductsLoaded(products(5)))
            .expect("update");
        table.handle_key_event(key(KeyCode::Char('G'))).expect("key");
        assert_eq!(table.selected().map(|p| p.id), Some(5));

        table
            .update(&Action::ProductsLoaded(products(2)))
            .expect("update");
        assert_eq!(table.selected().map(|p| p.id), Some(2));
    }

    #[test]
    fn delete_key_emits_request_for_selected_row() {
        let mut table = ProductTable::new();
        table
            .update(&Action::ProductsLoaded(products(2)))
            .expect("update");
        table.handle_key_event(key(KeyCode::Char('j'))).expect("key");

        let action = table.handle_key_event(key(KeyCode::Char('d'))).expect("key");
        match action {
            Some(Action::RequestDelete(p)) => assert_eq!(p.id, 2),
            other => panic!("expected RequestDelete, got {other:?}"),
        }
    }

    #[test]
    fn keys_are_inert_on_an_empty_table() {
        let mut table = ProductTable::new();
        assert!(table.handle_key_event(key(KeyCode::Char('e'))).expect("key").is_none());
        assert!(table.handle_key_event(key(KeyCode::Char('d'))).expect("key").is_none());
        assert!(table.selected().is_none());
    }
}
