//! Terminal snake with two wall behaviors, a local mock backend for the
//! leaderboard and live sessions, and an AI player that drives the
//! spectator screen.

pub mod ai;
pub mod api;
pub mod app;
pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
