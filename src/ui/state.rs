use gtk4 as gtk;
use gtk4::glib;

use pairs::game::{ConfigError, Game, GameConfig};

pub struct AppState {
    pub title_subtitle: Option<gtk::Label>,
    pub attempts_label: Option<gtk::Label>,
    pub countdown_label: Option<gtk::Label>,
    pub board_container: Option<gtk::Box>,
    pub result_panel: Option<gtk::Box>,
    pub result_title: Option<gtk::Label>,
    pub result_message: Option<gtk::Label>,

    // Game state
    pub game: Game,
    pub grid_buttons: Vec<gtk::Button>,
    pub timer_handle: Option<glib::SourceId>,
    pub debug_enabled: bool,
}

impl AppState {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let game = Game::new(config, &mut rand::rng())?;
        Ok(AppState {
            title_subtitle: None,
            attempts_label: None,
            countdown_label: None,
            board_container: None,
            result_panel: None,
            result_title: None,
            result_message: None,
            game,
            grid_buttons: Vec::new(),
            timer_handle: None,
            debug_enabled: false,
        })
    }

    pub fn grid_columns(&self) -> i32 {
        self.game.config().columns.max(1) as i32
    }

    pub fn grid_rows(&self) -> i32 {
        let cols = self.grid_columns() as usize;
        self.game.deck().len().div_ceil(cols).max(1) as i32
    }
}
