pub mod config;
pub mod error;
pub mod filters;
pub mod observability;
pub mod state;

pub use config::{DefaultsConfig, LoggingConfig, MenuConfig};
pub use error::MenuError;
pub use filters::{DietaryFilters, DietaryRestriction};
pub use state::{MenuSnapshot, MenuState, menu_state};
