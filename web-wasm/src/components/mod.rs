pub mod header;
pub mod login_panel;
pub mod session_panel;
pub mod submission_list;
pub mod upload_control;
