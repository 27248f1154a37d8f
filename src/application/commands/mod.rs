// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between UI and Services
// - Commands accept plain values, return DTOs
// - Commands convert errors into serialized ErrorResponses
// - Commands NEVER contain business logic

pub mod draw_commands;
pub mod member_commands;
pub mod preferences_commands;
pub mod winner_commands;

pub use draw_commands::*;
pub use member_commands::*;
pub use preferences_commands::*;
pub use winner_commands::*;
