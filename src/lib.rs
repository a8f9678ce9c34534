pub mod cli;
pub mod column_selector;
pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod logging;
pub mod report;
pub mod session;
pub mod table;
