// Presentation layer - HTTP surface of the page
pub mod app_state;
pub mod handlers;
pub mod page_html;
pub mod routes;
