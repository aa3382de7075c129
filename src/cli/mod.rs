pub mod chart;
pub mod dashboard;
pub mod entries;
pub mod setup;
pub mod ui;
