pub use log_utils::log_init;

mod log_utils;
