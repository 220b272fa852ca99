pub mod clock;
pub mod config_trait;
pub mod logging;
