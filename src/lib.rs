//! Grid-based Snake.
//!
//! The simulation core ([`snake`], [`game`], [`food`], [`config`]) has no
//! knowledge of rendering, input devices or timers. The terminal front end
//! ([`input`], [`renderer`], [`terminal_runtime`]) drives it through
//! [`game::GameSession::change_direction`] and [`game::GameSession::tick`].

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod snake;
pub mod terminal_runtime;
