pub mod poll_routes;
pub mod ws_routes;
