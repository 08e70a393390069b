pub mod error;
pub mod config;
pub mod dictionary;
pub mod dom;
pub mod memory;
pub mod browser;
pub mod visibility;
pub mod matcher;
pub mod annotator;
pub mod request;
pub mod controller;
pub mod wasm;

pub use error::*;
pub use config::*;
pub use dictionary::*;
pub use dom::*;
pub use memory::*;
pub use browser::*;
pub use visibility::*;
pub use matcher::*;
pub use annotator::*;
pub use request::*;
pub use controller::*;
pub use wasm::*;

#[cfg(test)]
mod tests;
