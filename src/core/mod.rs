pub mod seed;
pub mod service;

pub use crate::domain::model::{Menu, Payment, Restaurant};
pub use crate::domain::ports::{MenuRepository, PaymentRepository, RestaurantRepository, Storage};
pub use crate::utils::error::Result;
