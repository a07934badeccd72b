use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use gtk4::gdk;
use tracing::{info, warn};

use super::app::restart_game;
use super::state::AppState;

fn flag_enabled(value: &str) -> bool {
    let v = value.trim().to_ascii_lowercase();
    matches!(v.as_str(), "1" | "true" | "yes" | "on")
}

pub fn debug_mode_enabled() -> bool {
    match std::env::var("PAIRS_DEBUG") {
        Ok(value) => flag_enabled(&value),
        Err(_) => false,
    }
}

fn dump_snapshot(st: &AppState) {
    let snapshot = st.game.snapshot(Instant::now());
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => info!(target: "pairs::debug", "{json}"),
        Err(err) => warn!(%err, "could not serialize the board"),
    }
}

/// Ctrl+F9 logs the board as JSON, Ctrl+R restarts without the header button.
pub fn handle_debug_shortcut(
    state: &Rc<RefCell<AppState>>,
    key: gdk::Key,
    mods: gdk::ModifierType,
) -> bool {
    if !state.borrow().debug_enabled || !mods.contains(gdk::ModifierType::CONTROL_MASK) {
        return false;
    }

    match key {
        gdk::Key::F9 => {
            dump_snapshot(&state.borrow());
            true
        }
        gdk::Key::R | gdk::Key::r => {
            restart_game(state);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::flag_enabled;

    #[test]
    fn flag_values() {
        for on in ["1", "true", " YES ", "On"] {
            assert!(flag_enabled(on), "{on}");
        }
        for off in ["", "0", "false", "debug"] {
            assert!(!flag_enabled(off), "{off}");
        }
    }
}
