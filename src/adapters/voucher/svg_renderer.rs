//! Draws voucher cards as standalone SVG documents.

use crate::domain::voucher::VoucherNotice;
use crate::ports::{NotifyError, VoucherCard, VoucherRenderer};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 450;

/// Renders a fixed card layout: recipient, karma, code, hashtag and period.
#[derive(Debug, Clone, Default)]
pub struct SvgVoucherRenderer;

impl SvgVoucherRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl VoucherRenderer for SvgVoucherRenderer {
    fn render(&self, notice: &VoucherNotice) -> Result<VoucherCard, NotifyError> {
        if notice.recipient_name.trim().is_empty() {
            return Err(NotifyError::Render("recipient name is blank".to_string()));
        }

        let svg = format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
<rect width="{w}" height="{h}" rx="24" fill="#1b1f3b"/>
<text x="48" y="80" font-family="sans-serif" font-size="28" fill="#ffffff">Karma Voucher</text>
<text x="48" y="170" font-family="sans-serif" font-size="36" font-weight="bold" fill="#ffffff">{name}</text>
<text x="48" y="250" font-family="sans-serif" font-size="64" font-weight="bold" fill="#f5c542">{karma} Karma</text>
<text x="48" y="330" font-family="monospace" font-size="24" fill="#ffffff">Code: {code}</text>
<text x="48" y="370" font-family="monospace" font-size="24" fill="#ffffff">{hashtag}</text>
<text x="{period_x}" y="410" font-family="sans-serif" font-size="20" fill="#9aa0c3" text-anchor="end">{period}</text>
</svg>
"##,
            w = WIDTH,
            h = HEIGHT,
            period_x = WIDTH - 48,
            name = escape(&notice.recipient_name),
            karma = notice.karma,
            code = notice.code,
            hashtag = escape(&notice.hashtag),
            period = escape(&notice.period),
        );

        Ok(VoucherCard {
            content_type: "image/svg+xml",
            extension: "svg",
            bytes: svg.into_bytes(),
        })
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
