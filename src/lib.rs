pub mod config;
pub mod endpoint;
pub mod frontend;
pub mod generate_core;

pub use frontend::server_liveview::start_server;
