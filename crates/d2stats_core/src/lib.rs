pub mod aggregate;
pub mod breakpoints;
pub mod config;
pub mod core_api;
pub mod equipment;
pub mod experience;
pub mod export;
pub mod game_data;
pub mod model;
pub mod properties;
pub mod recompute;
pub mod savegame;
pub mod stats;
pub mod translation;
