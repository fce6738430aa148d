//! Simulation core of a vertical-scrolling arcade shooter.
//!
//! The host owns the screen: it implements [`render::Renderer`] and
//! [`render::Clock`], forwards touches to [`game::GameView::on_touch_event`]
//! and calls [`game::GameView::on_draw`] once per frame.

pub mod aircraft;
pub mod compute;
pub mod config;
pub mod entities;
pub mod game;
pub mod input;
pub mod render;
