pub mod panel;
pub mod question;
