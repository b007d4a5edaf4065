mod app;
mod components;
pub mod server_liveview;
pub mod session;
pub mod transport;
