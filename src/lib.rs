//! Memory-matching card game engine.
//!
//! The [`game`] module holds everything that decides what the board looks
//! like: the deck, the turn state machine, the intro script and the
//! countdown. Rendering and scheduling live in the GTK binary.

pub mod game;
