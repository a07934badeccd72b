use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;
use std::time::{Duration, Instant};

use adw::prelude::*;
use gettextrs::gettext;
use gio::SimpleAction;
use gtk4 as gtk;
use gtk4::gdk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use tracing::{debug, error, trace, warn};

use pairs::game::{GameConfig, Generation, IntroAction, Resolution, TapOutcome};

use super::board::{CONTENT_MARGIN, build_board_grid, refresh_cards};
use super::debug_tools;
use super::dialogs::{show_about_dialog, show_instructions_dialog};
use super::hud::{start_timer, status_line, stop_timer, update_hud, update_result_panel};
use super::state::AppState;

pub const APP_ID: &str = "io.github.pairsgame.Pairs";
const RESOURCE_PREFIX: &str = "/io/github/pairsgame/Pairs";

pub(super) fn refresh_view(state: &Rc<RefCell<AppState>>) {
    let st = state.borrow();
    refresh_cards(&st);
    update_hud(&st);
    update_result_panel(&st);
}

fn start_intro(state: &Rc<RefCell<AppState>>, generation: Generation) {
    debug!(%generation, "intro started");
    schedule_intro_step(state, generation, 0);
}

// Each step schedules the next only after it has run, so a restart that
// bumps the generation cuts the chain at the next boundary.
fn schedule_intro_step(state: &Rc<RefCell<AppState>>, generation: Generation, position: usize) {
    let Some(step) = state.borrow().game.intro_script().step(position) else {
        return;
    };

    let state_step = state.clone();
    glib::timeout_add_local(step.delay, move || {
        let result = {
            let mut st = state_step.borrow_mut();
            st.game
                .apply_intro(generation, step.action, Instant::now(), &mut rand::rng())
        };
        if let Err(err) = result {
            trace!(%err, position, "intro step discarded");
            return glib::ControlFlow::Break;
        }

        refresh_view(&state_step);
        if step.action == IntroAction::Finish {
            start_timer(&state_step, generation);
        } else {
            schedule_intro_step(&state_step, generation, position + 1);
        }
        glib::ControlFlow::Break
    });
}

pub fn handle_card_click(state: &Rc<RefCell<AppState>>, index: usize) {
    let (outcome, generation, settle_delay) = {
        let mut st = state.borrow_mut();
        let outcome = st.game.tap(index);
        (outcome, st.game.generation(), st.game.config().settle_delay())
    };

    match outcome {
        Ok(TapOutcome::Flipped(_)) => refresh_view(state),
        Ok(TapOutcome::PairSelected(_)) => {
            refresh_view(state);
            schedule_pair_check(state, generation, settle_delay);
        }
        Ok(TapOutcome::Ignored(reason)) => trace!(index, ?reason, "card tap ignored"),
        Err(err) => debug!(%err, "card tap discarded"),
    }
}

fn schedule_pair_check(state: &Rc<RefCell<AppState>>, generation: Generation, delay: Duration) {
    let state_check = state.clone();
    glib::timeout_add_local(delay, move || {
        let result = state_check.borrow_mut().game.resolve_pair(generation);
        match result {
            Ok(Resolution::Matched { won: true, .. }) => {
                stop_timer(&mut state_check.borrow_mut());
            }
            Ok(resolution) => trace!(?resolution, "pair settled"),
            Err(err) if err.is_stale() => {
                trace!(%err, "pair check discarded");
                return glib::ControlFlow::Break;
            }
            Err(err) => error!(%err, "pair check failed"),
        }
        refresh_view(&state_check);
        glib::ControlFlow::Break
    });
}

pub(super) fn restart_game(state: &Rc<RefCell<AppState>>) {
    let generation = {
        let mut st = state.borrow_mut();
        stop_timer(&mut st);
        st.game.restart(&mut rand::rng());
        st.game.generation()
    };
    refresh_view(state);
    start_intro(state, generation);
}

fn load_config() -> GameConfig {
    match GameConfig::load() {
        Ok(config) => config,
        Err(err) => {
            warn!(%err, "using the default configuration");
            GameConfig::default()
        }
    }
}

pub fn run() -> glib::ExitCode {
    glib::set_prgname(Some(APP_ID));
    let app = adw::Application::builder()
        .application_id(APP_ID)
        .build();

    app.connect_activate(move |app| {
        load_css();

        let state = match AppState::new(load_config()) {
            Ok(state) => Rc::new(RefCell::new(state)),
            Err(err) => {
                error!(%err, "could not deal the board");
                return;
            }
        };
        state.borrow_mut().debug_enabled = debug_tools::debug_mode_enabled();

        let instructions_action = SimpleAction::new("instructions", None);
        instructions_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_instructions_dialog(&app);
            }
        });
        app.add_action(&instructions_action);

        let about_action = SimpleAction::new("about", None);
        about_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_about_dialog(&app);
            }
        });
        app.add_action(&about_action);

        let quit_action = SimpleAction::new("quit", None);
        quit_action.connect_activate({
            let app = app.clone();
            move |_, _| app.quit()
        });
        app.add_action(&quit_action);
        app.set_accels_for_action("app.quit", &["<Control>q"]);

        let title_box = gtk::Box::new(gtk::Orientation::Vertical, 0);
        title_box.set_valign(gtk::Align::Center);
        title_box.set_halign(gtk::Align::Center);
        title_box.set_hexpand(true);

        let title_main = gtk::Label::builder()
            .label("Pairs")
            .halign(gtk::Align::Center)
            .css_classes(vec!["game-title-main"])
            .build();
        let title_subtitle = gtk::Label::builder()
            .label(status_line(state.borrow().game.status()))
            .halign(gtk::Align::Center)
            .css_classes(vec!["game-title-subtitle", "caption"])
            .build();
        title_box.append(&title_main);
        title_box.append(&title_subtitle);

        let header = adw::HeaderBar::builder()
            .title_widget(&title_box)
            .build();
        header.add_css_class("app-header");
        header.add_css_class("flat");

        let menu_model = gio::Menu::new();
        menu_model.append(Some(gettext("Instructions").as_str()), Some("app.instructions"));
        menu_model.append(Some(gettext("About Pairs").as_str()), Some("app.about"));
        menu_model.append(Some(gettext("Quit").as_str()), Some("app.quit"));
        let menu_button = gtk::MenuButton::builder()
            .icon_name("open-menu-symbolic")
            .menu_model(&menu_model)
            .build();

        let restart_button = gtk::Button::builder()
            .icon_name("view-refresh-symbolic")
            .build();
        restart_button.set_tooltip_text(Some(gettext("New Game").as_str()));
        restart_button.connect_clicked({
            let state = state.clone();
            move |_| restart_game(&state)
        });
        let end_box = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        end_box.append(&restart_button);
        end_box.append(&menu_button);
        header.pack_end(&end_box);

        state.borrow_mut().title_subtitle = Some(title_subtitle);

        let game_view = build_game_view(&state);

        let toolbar = adw::ToolbarView::new();
        toolbar.set_hexpand(true);
        toolbar.set_vexpand(true);
        toolbar.add_top_bar(&header);
        toolbar.set_content(Some(&game_view));

        let win = adw::ApplicationWindow::builder()
            .application(app)
            .title("Pairs")
            .icon_name(APP_ID)
            .default_width(520)
            .default_height(720)
            .content(&toolbar)
            .build();
        win.set_size_request(320, 480);
        win.add_css_class("app-window");

        let global_key = gtk::EventControllerKey::new();
        global_key.set_propagation_phase(gtk::PropagationPhase::Capture);
        global_key.connect_key_pressed({
            let state = state.clone();
            move |_, key, _, mods| {
                if debug_tools::handle_debug_shortcut(&state, key, mods) {
                    return glib::Propagation::Stop;
                }
                glib::Propagation::Proceed
            }
        });
        win.add_controller(global_key);

        win.connect_close_request({
            let state = state.clone();
            move |_| {
                stop_timer(&mut state.borrow_mut());
                glib::Propagation::Proceed
            }
        });

        refresh_view(&state);
        win.present();

        let (generation, start_delay) = {
            let st = state.borrow();
            (st.game.generation(), st.game.config().intro.start_delay())
        };
        let state_start = state.clone();
        glib::timeout_add_local(start_delay, move || {
            if state_start.borrow().game.generation() == generation {
                start_intro(&state_start, generation);
            }
            glib::ControlFlow::Break
        });
    });

    app.run()
}

fn load_css() {
    static RESOURCES_INIT: Once = Once::new();
    RESOURCES_INIT.call_once(|| {
        if let Err(err) = gio::resources_register_include!("pairs.gresource") {
            error!(%err, "failed to register embedded resources");
        }
    });

    let Some(display) = gdk::Display::default() else {
        return;
    };

    let provider = gtk::CssProvider::new();
    provider.load_from_resource(&format!("{RESOURCE_PREFIX}/style.css"));
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

fn build_game_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("game-root");
    root.set_margin_top(CONTENT_MARGIN);
    root.set_margin_bottom(CONTENT_MARGIN);
    root.set_margin_start(CONTENT_MARGIN);
    root.set_margin_end(CONTENT_MARGIN);

    let hud = gtk::Box::new(gtk::Orientation::Vertical, 0);
    hud.add_css_class("game-hud");
    let attempts_label = gtk::Label::builder()
        .halign(gtk::Align::Center)
        .css_classes(vec!["hud-attempts"])
        .build();
    let countdown_label = gtk::Label::builder()
        .halign(gtk::Align::Center)
        .css_classes(vec!["hud-countdown", "title-1"])
        .build();
    hud.append(&attempts_label);
    hud.append(&countdown_label);
    root.append(&hud);

    let board_grid = build_board_grid(state);

    let board_card = gtk::Box::new(gtk::Orientation::Vertical, 0);
    board_card.set_halign(gtk::Align::Fill);
    board_card.set_valign(gtk::Align::Fill);
    board_card.set_hexpand(true);
    board_card.set_vexpand(true);
    board_card.add_css_class("pairs-card-container");

    let (grid_cols, grid_rows) = {
        let st = state.borrow();
        (st.grid_columns() as f32, st.grid_rows() as f32)
    };
    let grid_ratio = if grid_rows > 0.0 { grid_cols / grid_rows } else { 1.0 };
    let grid_frame = gtk::AspectFrame::new(0.5, 0.5, grid_ratio, false);
    grid_frame.set_halign(gtk::Align::Fill);
    grid_frame.set_valign(gtk::Align::Fill);
    grid_frame.set_hexpand(true);
    grid_frame.set_vexpand(true);
    grid_frame.set_child(Some(&board_grid));
    board_card.append(&grid_frame);

    let result_panel = gtk::Box::new(gtk::Orientation::Vertical, 12);
    result_panel.set_halign(gtk::Align::Center);
    result_panel.set_valign(gtk::Align::Center);
    result_panel.add_css_class("result-panel");
    result_panel.set_visible(false);
    let result_title = gtk::Label::builder()
        .css_classes(vec!["title-2"])
        .build();
    let result_message = gtk::Label::builder().wrap(true).build();
    let result_restart = gtk::Button::builder()
        .label(gettext("Restart"))
        .css_classes(vec!["suggested-action", "pill"])
        .build();
    result_restart.connect_clicked({
        let state = state.clone();
        move |_| restart_game(&state)
    });
    result_panel.append(&result_title);
    result_panel.append(&result_message);
    result_panel.append(&result_restart);

    let overlay = gtk::Overlay::new();
    overlay.set_child(Some(&board_card));
    overlay.add_overlay(&result_panel);
    root.append(&overlay);

    {
        let mut st = state.borrow_mut();
        st.attempts_label = Some(attempts_label);
        st.countdown_label = Some(countdown_label);
        st.board_container = Some(board_card);
        st.result_panel = Some(result_panel);
        st.result_title = Some(result_title);
        st.result_message = Some(result_message);
    }

    root
}
