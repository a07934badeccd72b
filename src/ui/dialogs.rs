use gettextrs::gettext;
use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;

use super::app::APP_ID;

const DEVELOPERS: &[&str] = &["The Pairs developers"];
const COPYRIGHT: &str = "© 2026 The Pairs developers";

pub fn show_instructions_dialog(app: &adw::Application) -> adw::AlertDialog {
    let body = gettext(
        "Watch the cards while they are shuffled.\n\
Once they are turned over, tap two cards to flip them.\n\
Find every pair before the countdown reaches zero.",
    );
    let dialog = adw::AlertDialog::new(Some(gettext("Instructions").as_str()), Some(body.as_str()));
    dialog.add_response("ok", &gettext("Got it"));
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(app.active_window().as_ref());
    dialog
}

pub fn show_about_dialog(app: &adw::Application) -> adw::AboutDialog {
    let dialog = adw::AboutDialog::builder()
        .application_name("Pairs")
        .application_icon(APP_ID)
        .developer_name(DEVELOPERS[0])
        .developers(DEVELOPERS.to_vec())
        .version(env!("CARGO_PKG_VERSION"))
        .comments(gettext("Memorize the shuffle, then find every pair in time."))
        .build();
    dialog.add_legal_section(
        "Pairs",
        Some(COPYRIGHT),
        gtk::License::MitX11,
        None,
    );
    dialog.present(app.active_window().as_ref());
    dialog
}
