pub mod history_controller;
pub mod send_controller;
pub mod session_controller;
