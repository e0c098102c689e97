//! Main render/view function (View in TEA pattern)


use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use sdash_app::state::{AppState, UiMode};
use sdash_app::view::{mode_view, ModeView};
use sdash_core::Mode;

use super::{layout, widgets};
use crate::theme::palette;

/// Render the complete UI
///
/// Pure: builds the active mode's fragments from `state` and draws them.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let mode_view = mode_view(state, state.mode);
    let auth_active = state.auth_form_active();
    let prompt_active = state.ui_mode == UiMode::UploadPrompt;
    let show_upload =
        prompt_active || state.upload.in_progress() || !state.upload.lines.is_empty();

    let areas = layout::create(area, !auth_active, show_upload && !auth_active);

    frame.render_widget(
        widgets::ModeHeader::new(state.mode, &mode_view.health)
            .with_user(mode_view.user.as_deref()),
        areas.header,
    );

    if auth_active {
        frame.render_widget(widgets::AuthFormView::new(&state.auth), areas.body);
    } else {
        frame.render_widget(
            widgets::StatsPanel::new(&mode_view.stats, state.mode),
            areas.stats,
        );
        render_body(frame, areas.body, &mode_view, state.selected);
        if show_upload {
            frame.render_widget(
                widgets::UploadPanel::new(&state.upload, prompt_active, state.mode),
                areas.upload,
            );
        }
    }

    frame.render_widget(widgets::NoticeBar::new(&state.notices), areas.notice);
    frame.render_widget(widgets::KeyHints::new(state), areas.status);
}

fn render_body(frame: &mut Frame, area: Rect, view: &ModeView, selected: usize) {
    match view.mode {
        Mode::Simple | Mode::Distributed => {
            let [files, nodes] =
                Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                    .areas(area);
            frame.render_widget(
                widgets::FileList::new(&view.files, selected, view.mode),
                files,
            );
            frame.render_widget(widgets::NodeList::new(&view.nodes, view.mode), nodes);
        }
        Mode::Production => {
            let [cluster, logs] =
                Layout::vertical([Constraint::Percentage(45), Constraint::Percentage(55)])
                    .areas(area);
            frame.render_widget(widgets::ClusterGrid::new(&view.cluster), cluster);
            frame.render_widget(widgets::ReplicationLog::new(&view.logs), logs);
        }
        Mode::Secure => match &view.admin {
            Some(panel) => {
                let [files, admin] =
                    Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)])
                        .areas(area);
                frame.render_widget(
                    widgets::FileList::new(&view.files, selected, view.mode).title("My Files"),
                    files,
                );
                frame.render_widget(widgets::AdminSummary::new(panel), admin);
            }
            None => {
                frame.render_widget(
                    widgets::FileList::new(&view.files, selected, view.mode).title("My Files"),
                    area,
                );
            }
        },
    }
}
