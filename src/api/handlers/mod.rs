//! HTTP request handlers.

pub mod health_handler;
pub mod hierarchy_handler;
pub mod inspection_handler;
pub mod installation_handler;
pub mod maintenance_handler;
pub mod qr_handler;
pub mod supply_handler;

pub use hierarchy_handler::hierarchy_routes;
pub use inspection_handler::inspection_routes;
pub use installation_handler::installation_routes;
pub use maintenance_handler::maintenance_routes;
pub use qr_handler::qr_routes;
pub use supply_handler::supply_routes;
