//! Grid snake: a tick-driven simulation engine, the input gate in front of
//! it, and a terminal front end built on ratatui.

pub mod app;
pub mod audio;
pub mod config;
pub mod events;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod terminal_runtime;

pub mod ui {
    pub mod hud;
    pub mod menu;
}
