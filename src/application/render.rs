//! Report presentation helpers and the plain-text formatter.
//!
//! Channel formatters (Telegram MarkdownV2) live with their adapters and
//! reuse the number formatting here.

use chrono::FixedOffset;
use rust_decimal::Decimal;

use crate::domain::{Quote, Report};
use crate::port::outbound::messenger::ReportFormatter;

/// Group an amount into thousands with `.` separators, rounded to whole
/// units: `25400123.6` -> `25.400.124`.
#[must_use]
pub fn group_thousands(value: Decimal) -> String {
    let rounded = value.round();
    let digits = rounded.abs().trunc().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}

/// Format a quote price: four decimals below 10 (FX pairs), two otherwise.
#[must_use]
pub fn format_price(price: Decimal) -> String {
    if price < Decimal::TEN {
        format!("{:.4}", price.round_dp(4))
    } else {
        format!("{:.2}", price.round_dp(2))
    }
}

/// Signed percent change: `+0.42%`, `-1.10%`.
#[must_use]
pub fn format_change(change: Decimal) -> String {
    let sign = if change.is_sign_positive() { "+" } else { "" };
    format!("{sign}{:.2}%", change.round_dp(2))
}

/// Report date in the reader's timezone, `dd/mm/yyyy`.
#[must_use]
pub fn report_date(report: &Report, offset: FixedOffset) -> String {
    report
        .generated_at()
        .with_timezone(&offset)
        .format("%d/%m/%Y")
        .to_string()
}

/// One quote line without markup: `XAU/USD 2350.10 (+0.42%)`.
#[must_use]
pub fn quote_summary(quote: &Quote) -> String {
    match quote.percent_change() {
        Some(change) => format!(
            "{} {} ({})",
            quote.symbol(),
            format_price(quote.price()),
            format_change(change)
        ),
        None => format!("{} {}", quote.symbol(), format_price(quote.price())),
    }
}

/// Renders reports as plain text for terminals and logs.
#[derive(Debug, Clone)]
pub struct PlainTextFormatter {
    offset: FixedOffset,
}

impl PlainTextFormatter {
    #[must_use]
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl ReportFormatter for PlainTextFormatter {
    fn format(&self, report: &Report) -> String {
        let date = report_date(report, self.offset);
        if !report.is_available() {
            return format!(
                "Market Pulse [{date}]\n\
                Data temporarily unavailable: provider maintenance or API credits exhausted."
            );
        }

        let mut out = format!("Market Pulse [{date}]\n\nHeadlines:\n");
        if report.headlines().is_empty() {
            out.push_str("  (no headlines)\n");
        }
        for (i, headline) in report.headlines().iter().enumerate() {
            out.push_str(&format!(
                "  {}. {}\n     {}\n",
                i + 1,
                headline.title,
                headline.link
            ));
        }

        out.push_str("\nMarkets:\n");
        if let Some(rate) = report.rate() {
            out.push_str(&format!(
                "  1 {} = {} {}{}\n",
                rate.pair.base(),
                group_thousands(rate.value),
                rate.pair.quote_currency(),
                if rate.stale { " (last known)" } else { "" }
            ));
        }
        for quote in report.quotes().values() {
            out.push_str(&format!("  {}", quote_summary(quote)));
            if let (Some(local), Some(rate)) =
                (report.derived_value(quote.symbol()), report.rate())
            {
                out.push_str(&format!(
                    " = {} {}",
                    group_thousands(local),
                    rate.pair.quote_currency()
                ));
            }
            out.push('\n');
        }

        if let Some(anchor) = report.anchor_quote() {
            out.push_str(&format!(
                "\nKey level: {} {}\n",
                anchor.symbol(),
                format_price(anchor.price())
            ));
        }
        out
    }
}
