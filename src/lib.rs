pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{InMemoryStore, Snapshot, SnapshotStore};
pub use config::{cli::LocalStorage, toml_config::AppConfig};
pub use core::service::RestaurantService;
pub use domain::model::{Menu, Payment, Restaurant};
pub use domain::views::{MenuView, PaymentView, RestaurantInput, RestaurantView};
pub use utils::error::{CrudError, Result};
