pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod schema;
pub mod store;
pub mod ui;
pub mod writer;

pub use cli::{Cli, Commands};
pub use config::LoadOptions;
pub use error::{ErrorKind, Result, StoreError};
pub use parser::Record;
pub use store::Store;
pub use ui::{Phase, ProgressUi, SilentUi, Ui};
