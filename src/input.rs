//! Input router: terminal key and mouse events to logical actions

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::render::term::Letterbox;
use crate::sim::Command;
use crate::ui::Hud;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Game(Command),
    /// Leave the program
    Quit,
}

pub fn from_key(key: &KeyEvent) -> Option<Action> {
    // Release and repeat events would double-flap on terminals that report them
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char(' ') | KeyCode::Up => Some(Action::Game(Command::Activate)),
        KeyCode::Char('r') | KeyCode::Enter => Some(Action::Game(Command::Restart)),
        _ => None,
    }
}

/// A left press on the play field activates; on the restart button it restarts
pub fn from_mouse(mouse: &MouseEvent, letterbox: Option<Letterbox>, hud: &Hud) -> Option<Action> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    let (x, y) = letterbox?.cell_to_canvas(mouse.column, mouse.row)?;
    if hud.restart_button_hit(x, y) {
        Some(Action::Game(Command::Restart))
    } else {
        Some(Action::Game(Command::Activate))
    }
}

/// Route any terminal event; resize and focus events are not actions
pub fn route(event: &Event, letterbox: Option<Letterbox>, hud: &Hud) -> Option<Action> {
    match event {
        Event::Key(key) => from_key(key),
        Event::Mouse(mouse) => from_mouse(mouse, letterbox, hud),
        _ => None,
    }
}
