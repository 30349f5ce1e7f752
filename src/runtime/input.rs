//! Keyboard input handling
//!
//! Maps a logical key plus modifier state to a message. Focus capture comes
//! first: an open colour prompt takes digits, Enter and Escape, and a focused
//! form field takes typing before any mode shortcut is considered.

use winit::keyboard::{Key, NamedKey};

use gridpaint::messages::{AppMsg, GridMsg, ModeMsg, Msg, ViewMsg};
use gridpaint::mode::Mode;
use gridpaint::model::AppModel;

/// Modifier keys relevant to the key table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
}

/// Translate a key press into a message, or `None` if it is unbound
pub fn handle_key(model: &AppModel, key: &Key, mods: Modifiers) -> Option<Msg> {
    if model.mode.is_prompting() {
        return prompt_key(key);
    }

    if mods.ctrl {
        return command_key(key, mods.shift);
    }

    if model.form.focused.is_some() {
        if let Some(msg) = field_key(key) {
            return Some(msg);
        }
    }

    match key {
        Key::Named(NamedKey::Enter) => Some(Msg::Grid(GridMsg::DefineFromForm)),
        Key::Named(NamedKey::Tab) => Some(Msg::Grid(GridMsg::FocusNextField)),
        Key::Named(NamedKey::Escape) => Some(Msg::Mode(ModeMsg::Cancel)),

        Key::Named(NamedKey::ArrowUp) if mods.shift => Some(Msg::Grid(GridMsg::AdjustRows(1))),
        Key::Named(NamedKey::ArrowDown) if mods.shift => Some(Msg::Grid(GridMsg::AdjustRows(-1))),
        Key::Named(NamedKey::ArrowRight) if mods.shift => Some(Msg::Grid(GridMsg::AdjustCols(1))),
        Key::Named(NamedKey::ArrowLeft) if mods.shift => Some(Msg::Grid(GridMsg::AdjustCols(-1))),

        Key::Character(s) => {
            let ch = single_char(s)?;
            if let Some(slot) = palette_slot(ch) {
                return Some(Msg::Mode(ModeMsg::SelectPaletteColor(slot)));
            }
            mode_for_key(ch).map(Msg::toggle)
        }

        _ => None,
    }
}

/// Keys accepted while the submatrix colour prompt is open
fn prompt_key(key: &Key) -> Option<Msg> {
    match key {
        Key::Named(NamedKey::Enter) => Some(Msg::Mode(ModeMsg::AcceptPrompt)),
        Key::Named(NamedKey::Escape) => Some(Msg::Mode(ModeMsg::Cancel)),
        Key::Character(s) => {
            let slot = palette_slot(single_char(s)?)?;
            Some(Msg::Mode(ModeMsg::SelectPaletteColor(slot)))
        }
        _ => None,
    }
}

/// Editing keys for the focused form field
fn field_key(key: &Key) -> Option<Msg> {
    match key {
        Key::Named(NamedKey::Backspace) => Some(Msg::Grid(GridMsg::FieldBackspace)),
        Key::Named(NamedKey::Escape) => Some(Msg::Grid(GridMsg::FocusField(None))),
        Key::Character(s) => {
            let ch = single_char(s)?;
            (ch.is_ascii_digit() || ch == '.' || ch == '-')
                .then_some(Msg::Grid(GridMsg::FieldInput(ch)))
        }
        _ => None,
    }
}

/// Ctrl shortcuts
fn command_key(key: &Key, shift: bool) -> Option<Msg> {
    let Key::Character(s) = key else {
        return None;
    };
    let msg = match single_char(s)?.to_ascii_lowercase() {
        'o' => Msg::App(AppMsg::OpenImage),
        's' => Msg::App(AppMsg::ExportProject),
        'e' if shift => Msg::App(AppMsg::ExportProject),
        'i' => Msg::App(AppMsg::ImportProject),
        'z' => Msg::Grid(GridMsg::Undo),
        'y' => Msg::Grid(GridMsg::Redo),
        '=' | '+' => Msg::View(ViewMsg::ZoomIn),
        '-' | '_' => Msg::View(ViewMsg::ZoomOut),
        '0' => Msg::View(ViewMsg::Fit),
        'q' => Msg::App(AppMsg::Quit),
        _ => return None,
    };
    Some(msg)
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let ch = chars.next()?;
    chars.next().is_none().then_some(ch)
}

fn palette_slot(ch: char) -> Option<usize> {
    match ch.to_digit(10)? {
        0 => None,
        d => Some(d as usize),
    }
}

fn mode_for_key(ch: char) -> Option<Mode> {
    match ch.to_ascii_lowercase() {
        'c' => Some(Mode::Coordinate),
        'p' => Some(Mode::Paint),
        'e' => Some(Mode::Erase),
        'f' => Some(Mode::Fill),
        'a' => Some(Mode::AutoCorner),
        's' => Some(Mode::Submatrix),
        _ => None,
    }
}
