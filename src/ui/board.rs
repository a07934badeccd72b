use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::pango;
use gtk4::prelude::*;

use pairs::game::CardFace;

use super::app::handle_card_click;
use super::state::AppState;

pub const CONTENT_MARGIN: i32 = 12;
pub const CARD_GAP: i32 = 6;

const BACK_FONT: &str = "Cantarell, Noto Sans, sans";
const EMOJI_FONT: &str = "Noto Color Emoji, Apple Color Emoji, Segoe UI Emoji, sans";
const MATCHED_ALPHA: f64 = 0.45;

pub fn build_board_grid(state: &Rc<RefCell<AppState>>) -> gtk::Grid {
    let grid = gtk::Grid::new();
    grid.add_css_class("pairs-board");
    grid.set_row_spacing(CARD_GAP as u32);
    grid.set_column_spacing(CARD_GAP as u32);
    grid.set_halign(gtk::Align::Fill);
    grid.set_valign(gtk::Align::Fill);
    grid.set_hexpand(true);
    grid.set_vexpand(true);

    let (grid_cols, card_count) = {
        let st = state.borrow();
        (st.grid_columns(), st.game.deck().len())
    };

    let mut buttons = Vec::with_capacity(card_count);

    for index in 0..card_count {
        let aspect_frame = gtk::AspectFrame::builder()
            .ratio(1.0)
            .obey_child(false)
            .halign(gtk::Align::Fill)
            .valign(gtk::Align::Fill)
            .hexpand(true)
            .vexpand(true)
            .build();

        let button = gtk::Button::builder()
            .css_classes(vec!["pairs-card"])
            .build();
        button.set_hexpand(true);
        button.set_vexpand(true);

        let drawing_area = gtk::DrawingArea::builder()
            .hexpand(true)
            .vexpand(true)
            .build();
        drawing_area.add_css_class("pairs-card-label");

        let state_draw = state.clone();
        drawing_area.set_draw_func(move |area, cr, width, height| {
            let st = state_draw.borrow();
            if let Some(card) = st.game.deck().get(index) {
                draw_face(area, cr, card.face(), width as f64, height as f64);
            }
        });

        button.set_child(Some(&drawing_area));

        let state_click = state.clone();
        button.connect_clicked(move |_| {
            handle_card_click(&state_click, index);
        });

        aspect_frame.set_child(Some(&button));

        let i = index as i32;
        grid.attach(&aspect_frame, i % grid_cols, i / grid_cols, 1, 1);
        buttons.push(button);
    }

    state.borrow_mut().grid_buttons = buttons;
    refresh_cards(&state.borrow());

    grid
}

fn draw_face(area: &gtk::DrawingArea, cr: &cairo::Context, face: CardFace<'_>, w: f64, h: f64) {
    cr.set_antialias(cairo::Antialias::Best);
    let side = w.min(h);

    #[allow(deprecated)]
    let fg = area.style_context().color();
    let (r, g, b, a) = (
        fg.red() as f64,
        fg.green() as f64,
        fg.blue() as f64,
        fg.alpha() as f64,
    );

    match face {
        CardFace::Hidden => {
            cr.set_source_rgba(r, g, b, a);
            centered_text(cr, "?", BACK_FONT, side * 0.34, true, (w / 2.0, h / 2.0));
        }
        CardFace::Shown(symbol) => {
            cr.set_source_rgba(r, g, b, a);
            centered_text(cr, symbol.as_str(), EMOJI_FONT, side * 0.40, false, (w / 2.0, h / 2.0));
        }
        CardFace::Matched(symbol) => {
            // Color emoji ignore the source alpha, so fade through a group.
            cr.push_group();
            centered_text(cr, symbol.as_str(), EMOJI_FONT, side * 0.32, false, (w / 2.0, h / 2.0));
            if cr.pop_group_to_source().is_ok() {
                let _ = cr.paint_with_alpha(MATCHED_ALPHA);
            }
            cr.set_source_rgba(r, g, b, a);
            centered_text(cr, "✓", BACK_FONT, side * 0.16, true, (w - side * 0.16, h - side * 0.16));
        }
    }
}

fn centered_text(cr: &cairo::Context, text: &str, family: &str, size: f64, bold: bool, at: (f64, f64)) {
    let layout = pangocairo::functions::create_layout(cr);
    let mut font = pango::FontDescription::new();
    font.set_family(family);
    if bold {
        font.set_weight(pango::Weight::Bold);
    }
    font.set_size((size * pango::SCALE as f64) as i32);
    layout.set_font_description(Some(&font));
    layout.set_text(text);

    let (tw, th) = layout.pixel_size();
    cr.move_to(at.0 - tw as f64 / 2.0, at.1 - th as f64 / 2.0);
    pangocairo::functions::show_layout(cr, &layout);
}

/// Syncs button classes with the deck and redraws every card face.
pub fn refresh_cards(st: &AppState) {
    let deck = st.game.deck();
    let selection = st.game.selection();
    for (index, button) in st.grid_buttons.iter().enumerate() {
        let Some(card) = deck.get(index) else {
            continue;
        };
        set_class(button, "matched", card.matched);
        set_class(button, "active", !card.face_down && !card.matched);
        set_class(button, "selected", selection.contains(index));
        if let Some(child) = button.child() {
            child.queue_draw();
        }
    }
}

fn set_class(widget: &impl IsA<gtk::Widget>, class: &str, on: bool) {
    if on {
        widget.add_css_class(class);
    } else {
        widget.remove_css_class(class);
    }
}
