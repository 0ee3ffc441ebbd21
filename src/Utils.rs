//! different utility modules used throughout the project
/// tiny module to initialize terminal logging
pub mod logger;
/// tiny module to render the comparison plot of a function and its integral
pub mod plots;
