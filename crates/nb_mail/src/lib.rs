pub mod console;
pub mod resend;

pub use console::ConsoleMailer;
pub use resend::ResendMailer;
