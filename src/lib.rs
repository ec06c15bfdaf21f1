pub mod client;
pub mod directory;
pub mod dispatch;
pub mod errors;
pub mod logging;
pub mod server;
pub mod settings;
pub mod spec;
