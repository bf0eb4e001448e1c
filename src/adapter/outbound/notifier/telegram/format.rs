//! MarkdownV2 rendering of reports.

use chrono::FixedOffset;

use crate::application::render::{format_change, format_price, group_thousands, report_date};
use crate::domain::{Quote, Report};
use crate::port::outbound::messenger::ReportFormatter;

/// Longest headline title kept before truncation.
const MAX_TITLE_CHARS: usize = 200;

const RULE: &str = "━━━━━━━━━━━━━━━━━━";

/// Renders reports for Telegram with `ParseMode::MarkdownV2`.
#[derive(Debug, Clone)]
pub struct TelegramFormatter {
    offset: FixedOffset,
}

impl TelegramFormatter {
    #[must_use]
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    fn quote_line(report: &Report, quote: &Quote) -> String {
        let mut line = format!(
            "• {}: `{}`",
            escape_markdown(quote.symbol().as_str()),
            format_price(quote.price())
        );
        if let Some(change) = quote.percent_change() {
            line.push_str(&format!(" \\({}\\)", escape_markdown(&format_change(change))));
        }
        if let (Some(local), Some(rate)) = (report.derived_value(quote.symbol()), report.rate()) {
            line.push_str(&format!(
                " ≈ *{} {}*",
                escape_markdown(&group_thousands(local)),
                escape_markdown(rate.pair.quote_currency())
            ));
        }
        line.push('\n');
        line
    }
}

impl ReportFormatter for TelegramFormatter {
    fn format(&self, report: &Report) -> String {
        let date = escape_markdown(&report_date(report, self.offset));
        if !report.is_available() {
            return format!(
                "📅 *Market Pulse \\[{date}\\]*\n\
                ⚠️ Data temporarily unavailable: provider maintenance or API credits exhausted\\."
            );
        }

        let mut out = format!("📅 *Market Pulse \\[{date}\\]*\n{RULE}\n\n");

        if !report.headlines().is_empty() {
            out.push_str("🔴 *HEADLINES*\n\n");
            for headline in report.headlines() {
                out.push_str(&format!(
                    "🔹 *{}*\n",
                    escape_markdown(&truncate(&headline.title, MAX_TITLE_CHARS))
                ));
                if !headline.link.is_empty() {
                    out.push_str(&format!("🔗 [Read more]({})\n", escape_link(&headline.link)));
                }
                out.push('\n');
            }
        }

        out.push_str("📈 *MARKETS*\n");
        if let Some(rate) = report.rate() {
            out.push_str(&format!(
                "• {}: 1 {} ≈ *{} {}*{}\n",
                escape_markdown(rate.pair.as_str()),
                escape_markdown(rate.pair.base()),
                escape_markdown(&group_thousands(rate.value)),
                escape_markdown(rate.pair.quote_currency()),
                if rate.stale { " _\\(last known\\)_" } else { "" }
            ));
        }
        for quote in report.quotes().values() {
            out.push_str(&Self::quote_line(report, quote));
        }

        if let Some(anchor) = report.anchor_quote() {
            out.push_str(&format!(
                "\n🎯 *KEY LEVEL*\n• Watch supply/demand around *{}*\n",
                escape_markdown(&format_price(anchor.price()))
            ));
        }

        out.push_str(&format!(
            "\n{RULE}\n💡 _Type /update for the latest data\\._"
        ));
        out
    }
}

/// Truncate a string with ellipsis (Unicode-safe).
pub fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// Escape special characters for Telegram `MarkdownV2`.
pub fn escape_markdown(text: &str) -> String {
    let special_chars = [
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
        '\\',
    ];
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if special_chars.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

/// Escape the URL part of an inline link, where only `)` and `\` are special.
fn escape_link(url: &str) -> String {
    url.replace('\\', "\\\\").replace(')', "\\)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Headline, LocalRate, Symbol};
    use chrono::{DateTime, Utc};
    use rust_decimal_macros::dec;

    fn ict() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    fn symbol(s: &str) -> Symbol {
        Symbol::try_new(s).unwrap()
    }

    fn at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-02T01:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn full_report() -> Report {
        let gold = Quote::try_new(symbol("XAU/USD"), dec!(2350.1), Some(dec!(0.42))).unwrap();
        let eur = Quote::try_new(symbol("EUR/USD"), dec!(1.0845), Some(dec!(-0.1))).unwrap();
        Report::builder(at(), gold)
            .quote(eur)
            .headlines(vec![Headline::new(
                "Gold hits 3-month high (again)",
                "https://example.com/a_(b)",
            )])
            .rate(LocalRate {
                pair: symbol("USD/VND"),
                value: dec!(25400),
                stale: false,
            })
            .build()
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("hello"), "hello");
        assert_eq!(escape_markdown("hello_world"), "hello\\_world");
        assert_eq!(escape_markdown("*bold*"), "\\*bold\\*");
        assert_eq!(escape_markdown("test.com"), "test\\.com");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 5), "hello...");
        assert_eq!(truncate("Giá vàng", 3), "Giá...");
    }

    #[test]
    fn link_urls_escape_only_parentheses_and_backslash() {
        assert_eq!(escape_link("https://x.com/a_(b)"), "https://x.com/a_(b\\)");
    }

    #[test]
    fn available_report_renders_sections() {
        let text = TelegramFormatter::new(ict()).format(&full_report());

        assert!(text.starts_with("📅 *Market Pulse \\[02/03/2026\\]*"));
        assert!(text.contains("🔹 *Gold hits 3\\-month high \\(again\\)*"));
        assert!(text.contains("🔗 [Read more](https://example.com/a_(b\\))"));
        assert!(text.contains("• USD/VND: 1 USD ≈ *25\\.400 VND*\n"));
        assert!(text.contains("• XAU/USD: `2350.10` \\(\\+0\\.42%\\) ≈ *59\\.692\\.540 VND*"));
        assert!(text.contains("• EUR/USD: `1.0845` \\(\\-0\\.10%\\) ≈ *27\\.546 VND*"));
        assert!(text.contains("Watch supply/demand around *2350\\.10*"));
        assert!(text.ends_with("💡 _Type /update for the latest data\\._"));
    }

    #[test]
    fn stale_rate_is_flagged() {
        let gold = Quote::try_new(symbol("XAU/USD"), dec!(2000), None).unwrap();
        let report = Report::builder(at(), gold)
            .rate(LocalRate {
                pair: symbol("USD/VND"),
                value: dec!(25000),
                stale: true,
            })
            .build();

        let text = TelegramFormatter::new(ict()).format(&report);
        assert!(text.contains("_\\(last known\\)_"));
        assert!(!text.contains("HEADLINES"));
    }

    #[test]
    fn unavailable_report_is_a_notice() {
        let report = Report::unavailable(at(), symbol("XAU/USD"), "credits");
        let text = TelegramFormatter::new(ict()).format(&report);

        assert!(text.contains("temporarily unavailable"));
        assert!(!text.contains("MARKETS"));
        assert!(!text.contains('`'));
    }
}
