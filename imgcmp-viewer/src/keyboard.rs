//! Key → command mapping.
//!
//!   Escape       → quit            (press only)
//!   Z            → reset view      (press only)
//!   ArrowUp/Down → blend ± step
//!   [ / ]        → zoom out / in
//!   1 / 2 / 3    → show A / show B / show diff
//!   H            → toggle help
//!
//! Everything but Escape and Z also fires on key repeat.

use imgcmp_core::Command;
use winit::keyboard::{Key, NamedKey};

/// Maps a pressed key to a command. `repeat` is true for auto-repeat events.
pub fn command_for_key(key: &Key, repeat: bool) -> Option<Command> {
    let command = match key {
        Key::Named(NamedKey::Escape) => Command::Quit,
        Key::Named(NamedKey::ArrowUp) => Command::BlendUp,
        Key::Named(NamedKey::ArrowDown) => Command::BlendDown,
        Key::Character(c) => match c.as_str() {
            "z" | "Z" => Command::ResetView,
            "[" => Command::ZoomOut,
            "]" => Command::ZoomIn,
            "1" => Command::ShowA,
            "2" => Command::ShowB,
            "3" => Command::ShowDiff,
            "h" | "H" => Command::ToggleHelp,
            _ => return None,
        },
        _ => return None,
    };

    if repeat && matches!(command, Command::Quit | Command::ResetView) {
        return None;
    }
    Some(command)
}
