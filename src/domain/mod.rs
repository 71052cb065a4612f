// Domain layer - Plain data and the rules that relate it
pub mod chart;
pub mod page;
pub mod temperature;
pub mod timestamp;
