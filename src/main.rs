mod ui;

use gettextrs::{LocaleCategory, bind_textdomain_codeset, bindtextdomain, setlocale, textdomain};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const GETTEXT_PACKAGE: &str = "pairs";
const LOCALEDIR: &str = match option_env!("PAIRS_LOCALEDIR") {
    Some(dir) => dir,
    None => "/usr/share/locale",
};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pairs=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn init_i18n() {
    setlocale(LocaleCategory::LcAll, "");
    if let Err(err) = bindtextdomain(GETTEXT_PACKAGE, LOCALEDIR) {
        warn!(%err, "could not bind the text domain");
        return;
    }
    if let Err(err) = bind_textdomain_codeset(GETTEXT_PACKAGE, "UTF-8") {
        warn!(%err, "could not set the text domain codeset");
    }
    if let Err(err) = textdomain(GETTEXT_PACKAGE) {
        warn!(%err, "could not select the text domain");
    }
}

fn main() -> glib::ExitCode {
    init_logging();
    init_i18n();
    ui::app::run()
}
