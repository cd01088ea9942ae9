pub mod agent;
pub mod copy;
pub mod flow;
pub mod metadata;
pub mod package;
pub mod target;
pub mod template;
pub mod utils;
pub mod writer;

pub use utils::{Error, Result};
