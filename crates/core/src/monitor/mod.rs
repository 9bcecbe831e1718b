pub mod monitor_controller;
pub mod monitor_use_case;
pub mod notification;
pub mod page_state;
pub mod poller;
