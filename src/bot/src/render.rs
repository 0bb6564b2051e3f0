//! HTML building blocks for Telegram replies.

use chain_models::DenomInfo;
use chrono::Duration;

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn code(text: &str) -> String {
    format!("<code>{}</code>", escape(text))
}

pub fn link(url: &str, label: &str) -> String {
    format!("<a href=\"{url}\">{label}</a>")
}

pub fn mintscan_link(prefix: &str, path: &str, label: &str) -> String {
    link(&format!("https://mintscan.io/{prefix}/{path}"), label)
}

/// A `12.34 denom` cell in display units, wrapped in a code tag.
pub fn amount_cell(base_amount: f64, denom: &DenomInfo) -> String {
    format!(
        "<code>{:.2} {}</code>",
        denom.display_amount(base_amount),
        denom.denom
    )
}

/// Whole-second durations as `1d 2h 3m 4s`, leading zero units dropped.
pub fn human_duration(duration: Duration) -> String {
    let total = duration.num_seconds().abs();
    let (days, rest) = (total / 86_400, total % 86_400);
    let (hours, rest) = (rest / 3_600, rest % 3_600);
    let (minutes, seconds) = (rest / 60, rest % 60);

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 || !parts.is_empty() {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 || !parts.is_empty() {
        parts.push(format!("{minutes}m"));
    }
    parts.push(format!("{seconds}s"));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html_significant_characters() {
        assert_eq!(escape("a <b> & c"), "a &lt;b&gt; &amp; c");
    }

    #[test]
    fn code_escapes_its_content() {
        assert_eq!(code("<x>"), "<code>&lt;x&gt;</code>");
    }

    #[test]
    fn durations_read_naturally() {
        assert_eq!(human_duration(Duration::seconds(0)), "0s");
        assert_eq!(human_duration(Duration::seconds(59)), "59s");
        assert_eq!(human_duration(Duration::seconds(61)), "1m 1s");
        assert_eq!(human_duration(Duration::seconds(3_600)), "1h 0m 0s");
        assert_eq!(
            human_duration(Duration::seconds(90_061)),
            "1d 1h 1m 1s"
        );
        // Sign is dropped; the caller says "in the past" or "in the future".
        assert_eq!(human_duration(Duration::seconds(-75)), "1m 15s");
    }

    #[test]
    fn amounts_use_display_units() {
        let denom = DenomInfo {
            denom: "atom".to_string(),
            coefficient: 1_000_000.0,
        };
        assert_eq!(amount_cell(12_340_000.0, &denom), "<code>12.34 atom</code>");
    }
}
