//! User settings.
//!
//! - Schema and defaults in [`schema`]
//! - File discovery and parsing in [`loader`]
//!
//! Settings live in `~/.config/ignoro/config.yml` (or the file given with
//! `--config`). Everything is optional:
//!
//! ```yaml
//! source_url: https://github.com/github/gitignore
//! branch: main
//! transport: auto   # auto | git | archive
//! target_file: .gitignore
//! timeout_secs: 60
//! ```

pub mod loader;
pub mod schema;

pub use loader::{default_config_path, load_settings, load_settings_file, parse_settings};
pub use schema::{Settings, TransportPreference, DEFAULT_SOURCE_URL};
