//! Secure-mode login and register forms

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget},
};

use sdash_app::state::{AuthField, AuthForm, AuthView};
use sdash_core::Mode;

use crate::layout::centered;
use crate::theme::styles;

const FORM_WIDTH: u16 = 48;

pub struct AuthFormView<'a> {
    form: &'a AuthForm,
}

impl<'a> AuthFormView<'a> {
    pub fn new(form: &'a AuthForm) -> Self {
        Self { form }
    }

    fn field_line(&self, field: AuthField) -> Line<'static> {
        let focused = self.form.focus == field;
        let marker = if focused { "▶ " } else { "  " };
        let (label, value) = match field {
            AuthField::Username => ("Username", self.form.username.clone()),
            AuthField::Password => ("Password", mask(&self.form.password)),
            AuthField::Confirm => ("Confirm ", mask(&self.form.confirm)),
            AuthField::Admin => {
                let checkbox = if self.form.is_admin { "[x]" } else { "[ ]" };
                ("Admin   ", format!("{checkbox} (space to toggle)"))
            }
        };
        let value_style = if focused {
            styles::accent_bold(Mode::Secure)
        } else {
            styles::text_primary()
        };
        Line::from(vec![
            Span::styled(marker, styles::accent(Mode::Secure)),
            Span::styled(format!("{label}: "), styles::text_muted()),
            Span::styled(value, value_style),
        ])
    }
}

fn mask(secret: &str) -> String {
    "•".repeat(secret.chars().count())
}

impl Widget for AuthFormView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.form.view {
            AuthView::Login => "Login",
            AuthView::Register => "Register",
        };
        let fields = self.form.fields();
        let height = fields.len() as u16 + 6;
        let rect = centered(area, FORM_WIDTH, height);

        Clear.render(rect, buf);

        let mut lines = vec![Line::from("")];
        lines.extend(fields.iter().map(|f| self.field_line(*f)));
        lines.push(Line::from(""));
        let footer = if self.form.submitting {
            Span::styled("Contacting server...", styles::status_yellow())
        } else {
            match self.form.view {
                AuthView::Login => Span::styled(
                    "Ctrl+R: create an account",
                    styles::text_muted(),
                ),
                AuthView::Register => {
                    Span::styled("Ctrl+R: back to login", styles::text_muted())
                }
            }
        };
        lines.push(Line::from(footer).centered());

        Paragraph::new(lines)
            .block(styles::titled_block(title, true, Mode::Secure))
            .render(rect, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_password_is_masked() {
        let form = AuthForm {
            username: "alice".into(),
            password: "hunter2".into(),
            ..Default::default()
        };
        let mut term = TestTerminal::new();
        term.render_widget(AuthFormView::new(&form), term.area());
        assert!(term.buffer_contains("alice"));
        assert!(!term.buffer_contains("hunter2"));
        assert!(term.buffer_contains("Login"));
    }

    #[test]
    fn test_register_form_has_admin_checkbox() {
        let form = AuthForm {
            view: AuthView::Register,
            is_admin: true,
            ..Default::default()
        };
        let mut term = TestTerminal::new();
        term.render_widget(AuthFormView::new(&form), term.area());
        assert!(term.buffer_contains("Register"));
        assert!(term.buffer_contains("[x]"));
    }
}
