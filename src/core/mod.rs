pub mod engine;
pub mod pipeline;
pub mod prompts;

pub use crate::domain::model::{CardDescription, CardField};
pub use crate::domain::ports::{ConfigProvider, Storage, TextGenerator};
pub use crate::utils::error::Result;
