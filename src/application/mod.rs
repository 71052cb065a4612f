// Application layer - Use cases over the temperature source
pub mod chart_service;
pub mod temperature_source;
