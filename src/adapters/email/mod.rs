//! Outbound email adapters.

mod resend_sender;

pub use resend_sender::ResendEmailSender;
