pub mod carousel;
pub mod config;
pub mod error;
pub mod news;
pub mod storage;

pub use config::{AppConfig, CarouselConfig, EasingType};
pub use error::{Error, Result};
