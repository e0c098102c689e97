//! Key event handlers for UI modes

use sdash_core::Mode;

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    // Global keys, available in every screen
    match key {
        InputKey::CharCtrl('c') => return Some(Message::Quit),
        InputKey::F(n @ 1..=4) => return switch_to(n as usize - 1),
        InputKey::CharCtrl(c @ '1'..='4') => return switch_to(digit(c)),
        _ => {}
    }

    match state.ui_mode {
        UiMode::UploadPrompt => handle_key_upload_prompt(key),
        UiMode::Normal if state.auth_form_active() => handle_key_auth_form(key),
        UiMode::Normal => handle_key_normal(state, key),
    }
}

fn digit(c: char) -> usize {
    c.to_digit(10).map(|d| d as usize).unwrap_or(1) - 1
}

fn switch_to(index: usize) -> Option<Message> {
    Mode::from_index(index).map(Message::SwitchMode)
}

fn handle_key_normal(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::Esc => Some(Message::Quit),

        InputKey::Char(c @ '1'..='4') => switch_to(digit(c)),
        InputKey::Tab => Some(Message::NextMode),
        InputKey::BackTab => Some(Message::PrevMode),

        InputKey::Char('r') => Some(Message::ReloadMode),

        InputKey::Down | InputKey::Char('j') => Some(Message::SelectNext),
        InputKey::Up | InputKey::Char('k') => Some(Message::SelectPrev),

        InputKey::Char('u') => Some(Message::OpenUploadPrompt),
        InputKey::Char('d') | InputKey::Enter => Some(Message::DownloadSelected),

        InputKey::Char('x') | InputKey::Delete if state.mode == Mode::Secure => {
            Some(Message::DeleteSelected)
        }
        InputKey::Char('o') if state.mode == Mode::Secure => Some(Message::Logout),
        InputKey::Char('R') if state.mode == Mode::Distributed => Some(Message::Redistribute),

        _ => None,
    }
}

fn handle_key_upload_prompt(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter => Some(Message::SubmitUpload),
        InputKey::Esc => Some(Message::CancelUploadPrompt),
        InputKey::Backspace => Some(Message::UploadBackspace),
        InputKey::Char(c) => Some(Message::UploadInput(c)),
        _ => None,
    }
}

/// Secure mode while logged out: keys go to the login/register form
fn handle_key_auth_form(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter => Some(Message::SubmitAuth),
        InputKey::Tab | InputKey::Down => Some(Message::AuthFocusNext),
        InputKey::BackTab | InputKey::Up => Some(Message::AuthFocusPrev),
        InputKey::Backspace => Some(Message::AuthBackspace),
        InputKey::CharCtrl('r') => Some(Message::ToggleAuthForm),
        InputKey::Esc => Some(Message::SwitchMode(Mode::Simple)),
        InputKey::Char(c) => Some(Message::AuthInput(c)),
        _ => None,
    }
}
