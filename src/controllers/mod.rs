pub mod poll_controllers;
pub mod ws_controllers;
