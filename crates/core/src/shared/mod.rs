pub mod constants;
pub mod monitor_config;
