//! Product form pane — three bound inputs backing the draft state.
//!
//! The form owns the draft and emits `SubmitDraft` upward; whether that
//! becomes a create or an update is the app's decision. The required-field
//! check happens here, before anything reaches the network.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use tienda_api::{Category, ProductDraft};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

/// The three draft fields, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum FormField {
    #[default]
    Nombre,
    Precio,
    Categoria,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            Self::Nombre => Self::Precio,
            Self::Precio => Self::Categoria,
            Self::Categoria => Self::Nombre,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Nombre => Self::Categoria,
            Self::Precio => Self::Nombre,
            Self::Categoria => Self::Precio,
        }
    }
}

pub struct ProductForm {
    focused: bool,
    draft: ProductDraft,
    categories: Vec<Category>,
    active: FormField,
    edit_mode: bool,
    /// Inline required-field error, cleared on the next keystroke.
    error: Option<String>,
}

impl ProductForm {
    pub fn new() -> Self {
        Self {
            focused: false,
            draft: ProductDraft::default(),
            categories: Vec::new(),
            active: FormField::default(),
            edit_mode: false,
            error: None,
        }
    }

    #[cfg(test)]
    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    #[cfg(test)]
    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Return the form to create mode with empty fields.
    fn reset(&mut self) {
        self.draft = ProductDraft::default();
        self.edit_mode = false;
        self.active = FormField::default();
        self.error = None;
    }

    /// Index into `categories` of the currently selected category, if the
    /// draft references one that exists.
    fn selected_category(&self) -> Option<usize> {
        let id: u64 = self.draft.categoria_id.parse().ok()?;
        self.categories.iter().position(|c| c.id == id)
    }

    /// Cycle the category selection by `delta` (wrapping).
    #[allow(clippy::cast_possible_wrap)]
    fn cycle_category(&mut self, delta: isize) {
        if self.categories.is_empty() {
            return;
        }
        let len = self.categories.len() as isize;
        let next = match self.selected_category() {
            Some(idx) => (idx as isize + delta).rem_euclid(len),
            // No selection yet: Down picks the first, Up the last
            None if delta > 0 => 0,
            None => len - 1,
        };
        self.draft.categoria_id = self.categories[next as usize].id.to_string();
    }

    fn push_char(&mut self, c: char) {
        match self.active {
            FormField::Nombre => self.draft.nombre.push(c),
            FormField::Precio => {
                // Digits plus at most one decimal point
                if c.is_ascii_digit() || (c == '.' && !self.draft.precio.contains('.')) {
                    self.draft.precio.push(c);
                }
            }
            FormField::Categoria => {}
        }
    }

    fn pop_char(&mut self) {
        match self.active {
            FormField::Nombre => {
                self.draft.nombre.pop();
            }
            FormField::Precio => {
                self.draft.precio.pop();
            }
            FormField::Categoria => {
                self.draft.categoria_id.clear();
            }
        }
    }

    // ── Rendering helpers ───────────────────────────────────────────

    fn render_input_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        value: &str,
        active: bool,
    ) {
        if area.height < 4 {
            return;
        }

        let label_area = Rect::new(area.x, area.y, area.width, 1);
        let label_style = if active && self.focused {
            theme::input_label_active()
        } else {
            theme::input_label()
        };
        frame.render_widget(Paragraph::new(Span::styled(label, label_style)), label_area);

        let border_style = if active && self.focused {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);

        let block_area = Rect::new(area.x, area.y + 1, area.width, 3);
        let inner = block.inner(block_area);
        frame.render_widget(block, block_area);

        let text = if active && self.focused {
            format!("{value}\u{2588}")
        } else {
            value.to_string()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(theme::DIM_WHITE))),
            inner,
        );
    }

    fn category_display(&self) -> String {
        match self.selected_category() {
            Some(idx) => self.categories[idx].nombre.clone(),
            None => "Selecciona una categoría".into(),
        }
    }
}

impl Component for ProductForm {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code != KeyCode::Enter {
            self.error = None;
        }

        match key.code {
            KeyCode::Tab => self.active = self.active.next(),
            KeyCode::BackTab => self.active = self.active.prev(),
            KeyCode::Enter => {
                if self.draft.is_complete() {
                    return Ok(Some(Action::SubmitDraft(self.draft.clone())));
                }
                self.error = Some("Completa todos los campos".into());
            }
            KeyCode::Esc => return Ok(Some(Action::CancelEdit)),
            KeyCode::Up if self.active == FormField::Categoria => self.cycle_category(-1),
            KeyCode::Down if self.active == FormField::Categoria => self.cycle_category(1),
            KeyCode::Backspace => self.pop_char(),
            KeyCode::Char(c) => self.push_char(c),
            _ => {}
        }

        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::DataLoaded { categories, .. } => {
                self.categories = categories.clone();
            }
            Action::EditProduct(product) => {
                self.draft = ProductDraft::from_product(product);
                self.edit_mode = true;
                self.active = FormField::default();
                self.error = None;
            }
            Action::CancelEdit => self.reset(),
            // Successful round-trip returns the form to create mode
            Action::SubmitFinished(Ok(_)) => self.reset(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = if self.edit_mode {
            " Editar producto "
        } else {
            " Nuevo producto "
        };
        let block = Block::default()
            .title(title)
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

        let layout = Layout::vertical([
            Constraint::Length(4), // input row
            Constraint::Length(1), // error
            Constraint::Length(1), // hints
        ])
        .split(inner);

        let fields = Layout::horizontal([
            Constraint::Percentage(40),
            Constraint::Percentage(25),
            Constraint::Percentage(35),
        ])
        .spacing(2)
        .split(layout[0]);

        self.render_input_field(
            frame,
            fields[0],
            " Nombre",
            &self.draft.nombre,
            self.active == FormField::Nombre,
        );
        self.render_input_field(
            frame,
            fields[1],
            " Precio",
            &self.draft.precio,
            self.active == FormField::Precio,
        );
        self.render_input_field(
            frame,
            fields[2],
            " Categoría (↑/↓)",
            &self.category_display(),
            self.active == FormField::Categoria,
        );

        if let Some(ref err) = self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!(" {err}"),
                    Style::default().fg(theme::ERROR_RED),
                )),
                layout[1],
            );
        }

        let submit_label = if self.edit_mode {
            "actualizar  "
        } else {
            "agregar  "
        };
        let mut hints = vec![
            Span::styled(" Tab ", theme::key_hint_key()),
            Span::styled("campo  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled(submit_label, theme::key_hint()),
        ];
        if self.edit_mode {
            hints.push(Span::styled("Esc ", theme::key_hint_key()));
            hints.push(Span::styled("cancelar", theme::key_hint()));
        } else {
            hints.push(Span::styled("Esc ", theme::key_hint_key()));
            hints.push(Span::styled("volver a la tabla", theme::key_hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(hints)), layout[2]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
