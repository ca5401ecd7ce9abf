pub mod cors;
pub mod email;
pub mod error;
pub mod logger;
pub mod resend;
pub mod template;
