pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod console;
pub mod handlers;
pub mod interactive;
pub mod prompt;

pub use cli::{Cli, Command};
pub use config::{Environment, Settings};
pub use handlers::dispatch;
