use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use gettextrs::gettext;
use gtk4::glib;
use gtk4::prelude::*;
use tracing::trace;

use pairs::game::{CountdownPoll, Generation, Status};

use super::state::AppState;

const TICK_MS: u64 = 200;

pub(super) fn status_line(status: Status) -> String {
    match status {
        Status::Init => gettext("Memorize the cards"),
        Status::Ready | Status::Checking => gettext("Find the pairs"),
        Status::Success => gettext("Well done!"),
        Status::Failed => gettext("Time is up"),
    }
}

pub(super) fn update_hud(st: &AppState) {
    let status = st.game.status();
    if let Some(label) = &st.attempts_label {
        label.set_text(&format!("{} {}", gettext("Count:"), st.game.attempts()));
    }
    if let Some(label) = &st.countdown_label {
        // The full allowance is shown until the intro hands over.
        let secs = if status == Status::Init {
            u64::from(st.game.config().seconds)
        } else {
            st.game.remaining_secs(Instant::now()).unwrap_or(0)
        };
        label.set_text(&secs.to_string());
    }
    if let Some(subtitle) = &st.title_subtitle {
        subtitle.set_text(&status_line(status));
    }
}

pub(super) fn update_result_panel(st: &AppState) {
    let status = st.game.status();
    if let Some(container) = &st.board_container {
        if status.is_over() {
            container.add_css_class("board-finished");
        } else {
            container.remove_css_class("board-finished");
        }
    }
    if let Some(panel) = &st.result_panel {
        panel.set_visible(status.is_over());
        if status == Status::Success {
            panel.add_css_class("success");
            panel.remove_css_class("failed");
        } else {
            panel.add_css_class("failed");
            panel.remove_css_class("success");
        }
    }
    if let Some(title) = &st.result_title {
        title.set_text(&status_line(status));
    }
    if let Some(message) = &st.result_message {
        let text = match status {
            Status::Success => format!(
                "{} {}",
                gettext("Pairs found in attempts:"),
                st.game.attempts()
            ),
            Status::Failed => gettext("The board was not cleared in time."),
            _ => String::new(),
        };
        message.set_text(&text);
    }
}

pub(super) fn stop_timer(st: &mut AppState) {
    if let Some(handle) = st.timer_handle.take() {
        handle.remove();
    }
}

pub(super) fn start_timer(state: &Rc<RefCell<AppState>>, generation: Generation) {
    let mut st = state.borrow_mut();
    stop_timer(&mut st);

    let state_clone = state.clone();
    let handle = glib::timeout_add_local(Duration::from_millis(TICK_MS), move || {
        let mut st = state_clone.borrow_mut();
        match st.game.tick(generation, Instant::now()) {
            Ok(CountdownPoll::Idle | CountdownPoll::Running(_)) => {
                update_hud(&st);
                glib::ControlFlow::Continue
            }
            Ok(CountdownPoll::Expired | CountdownPoll::Finished) => {
                st.timer_handle = None;
                update_hud(&st);
                update_result_panel(&st);
                super::board::refresh_cards(&st);
                glib::ControlFlow::Break
            }
            Err(err) => {
                trace!(%err, "countdown tick discarded");
                st.timer_handle = None;
                glib::ControlFlow::Break
            }
        }
    });
    st.timer_handle = Some(handle);
}
