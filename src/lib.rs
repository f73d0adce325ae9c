pub mod commands;
pub mod config;
pub mod directory;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod render;
pub mod storage;
pub mod store;
pub mod theme;
pub mod ticklist;
pub mod tui;

pub use error::{Result, TicklistError};
pub use store::{Action, Outcome, TodoStore};
pub use ticklist::Ticklist;
