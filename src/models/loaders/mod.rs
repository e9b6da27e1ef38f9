pub mod toml_loader;

pub use toml_loader::{load_run_request, parse_run_request, write_request_template};
