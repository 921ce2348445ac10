pub mod assets;
pub mod calendar;
pub mod compare;
pub mod detail;
pub mod loader;
pub mod portfolio;
