pub mod config;
pub mod driver;
pub mod format;
pub mod logging;
pub mod report;
pub mod system;
