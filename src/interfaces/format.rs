use crate::application::report::JournalReport;
use crate::domain::performance::to_percent;
use rust_decimal::Decimal;

/// Grouped amount with at most two decimals: `12,345.6 USDT`.
pub fn format_amount(value: Decimal, currency: Option<&str>) -> String {
    let rounded = value.round_dp(2).normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + text.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    match currency {
        Some(ccy) if !ccy.is_empty() => format!("{} {}", grouped, ccy),
        _ => grouped,
    }
}

/// PnL cell text: explicit `+` on gains
pub fn format_signed(value: Decimal) -> String {
    if value >= Decimal::ZERO {
        format!("+{}", value.normalize())
    } else {
        value.normalize().to_string()
    }
}

/// Ratio as a percent with two decimals: `-0.11818` → `-11.82%`
pub fn format_percent(ratio: Decimal) -> String {
    format!("{:.2}%", to_percent(ratio))
}

/// `Total 1,000 USDT / Return 10.00% / MDD -4.55%`
pub fn summary_line(report: &JournalReport) -> String {
    let summary = &report.analysis.summary;
    format!(
        "Total {} / Return {} / MDD {}",
        format_amount(summary.total_pnl, Some(&report.settings.ccy)),
        format_percent(summary.return_ratio),
        format_percent(summary.max_drawdown)
    )
}

/// Net equity, plus its KRW equivalent when available
pub fn net_equity_line(report: &JournalReport) -> String {
    let net = report.analysis.summary.net_equity;
    let mut line = format_amount(net, Some(&report.settings.ccy));
    if let Some(krw) = report.to_krw(net) {
        line.push_str(&format!(" (≈ {})", format_amount(krw, Some("KRW"))));
    }
    line
}
