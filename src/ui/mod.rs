pub mod detail;
pub mod loading;
pub mod ranking;
