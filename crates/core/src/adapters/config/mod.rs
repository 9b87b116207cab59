pub mod app_config;
pub mod feed_config;
pub mod logging_config;
pub mod server_config;
