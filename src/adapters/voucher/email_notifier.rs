//! Sends voucher cards by email.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::domain::voucher::VoucherNotice;
use crate::ports::{
    EmailAttachment, EmailMessage, EmailSender, NotifyError, VoucherNotifier, VoucherRenderer,
};

pub const VOUCHER_SUBJECT: &str = "Congratulations on earning Karma points!";

/// Renders the card and mails it to the recipient as an attachment.
pub struct EmailVoucherNotifier {
    renderer: Arc<dyn VoucherRenderer>,
    email: Arc<dyn EmailSender>,
}

impl EmailVoucherNotifier {
    pub fn new(renderer: Arc<dyn VoucherRenderer>, email: Arc<dyn EmailSender>) -> Self {
        Self { renderer, email }
    }

    fn body(notice: &VoucherNotice) -> String {
        format!(
            "Greetings from Karma Portal!\n\n\
             Great news! You are just one step away from claiming your Karma points. \
             Post the Karma card attached to this email in the #task-dropbox channel \
             with the hashtag {} to redeem your points.\n\n\
             Name: {}\n\
             Email: {}",
            notice.hashtag, notice.recipient_name, notice.recipient_email
        )
    }
}

#[async_trait]
impl VoucherNotifier for EmailVoucherNotifier {
    async fn notify(&self, notice: &VoucherNotice) -> Result<(), NotifyError> {
        let card = self.renderer.render(notice)?;

        let message = EmailMessage::new(&notice.recipient_email, VOUCHER_SUBJECT, Self::body(notice))
            .with_attachment(EmailAttachment {
                filename: format!("{}.{}", notice.recipient_name, card.extension),
                content_type: card.content_type.to_string(),
                content: card.bytes,
            });

        self.email.send(&message).await?;
        debug!(to = %notice.recipient_email, code = %notice.code, "Voucher delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::RecordingEmailSender;
    use crate::adapters::voucher::SvgVoucherRenderer;
    use crate::domain::voucher::VoucherCode;
    use crate::ports::EmailError;

    fn notice(email: &str) -> VoucherNotice {
        VoucherNotice {
            recipient_email: email.to_string(),
            recipient_name: "Asha Nair".to_string(),
            karma: 50,
            code: VoucherCode::FIRST,
            hashtag: "#cl-rust".to_string(),
            period: "Feb/2".to_string(),
        }
    }

    #[tokio::test]
    async fn sends_card_as_named_attachment() {
        let email = Arc::new(RecordingEmailSender::new());
        let notifier = EmailVoucherNotifier::new(Arc::new(SvgVoucherRenderer::new()), email.clone());

        notifier.notify(&notice("asha@example.com")).await.unwrap();

        let sent = email.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, vec!["asha@example.com".to_string()]);
        assert_eq!(sent[0].subject, VOUCHER_SUBJECT);
        assert!(sent[0].text.contains("Name: Asha Nair\nEmail: asha@example.com"));
        assert_eq!(sent[0].attachments[0].filename, "Asha Nair.svg");
        assert_eq!(sent[0].attachments[0].content_type, "image/svg+xml");
    }

    #[tokio::test]
    async fn email_rejection_surfaces_as_notify_error() {
        let email = Arc::new(RecordingEmailSender::rejecting("bounce@example.com"));
        let notifier = EmailVoucherNotifier::new(Arc::new(SvgVoucherRenderer::new()), email);

        let result = notifier.notify(&notice("bounce@example.com")).await;

        assert!(matches!(result, Err(NotifyError::Email(EmailError::Rejected(_)))));
    }
}
