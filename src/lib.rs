//! Discofy Backend Service Library
//!
//! This library provides the building blocks for the discofy HTTP service:
//! CRUD endpoints for songs and playlists backed by a JSON document store,
//! and a recommendation pipeline that turns a free-text mood description
//! into a list of songs enriched with verified streaming links.
//!
//! # Modules
//!
//! - `api` - HTTP API handlers for the service endpoints
//! - `config` - Configuration management and environment variables
//! - `llm` - Language model client for the chat-completions API
//! - `pipeline` - Song recommendation pipeline (generate, enrich, format)
//! - `search` - Web search client used for link resolution
//! - `server` - HTTP server setup and routing
//! - `store` - JSON document store for songs and playlists
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use discofy::{config, server};
//!
//! #[tokio::main]
//! async fn main() {
//!     config::load_env().await.ok();
//!     // Build an AppState and start the server...
//! }
//! ```

pub mod api;
pub mod config;
pub mod llm;
pub mod pipeline;
pub mod search;
pub mod server;
pub mod store;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use discofy::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates during process startup and shutdown.
///
/// # Example
///
/// ```
/// info!("Starting server on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations.
///
/// # Example
///
/// ```
/// success!("Environment loaded");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// that require immediate program termination, such as an unusable server
/// address at startup.
///
/// # Behavior
///
/// This macro will cause the program to exit immediately after printing
/// the error message. It should only be used for fatal errors where
/// recovery is not possible.
///
/// # Example
///
/// ```
/// error!("Failed to parse server address: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues or important notices that don't require program
/// termination.
///
/// # Example
///
/// ```
/// warning!("No .env file found, relying on process environment");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
