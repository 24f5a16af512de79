//! Display formatting for monetary amounts.

use rust_decimal::Decimal;

use super::round_money;

/// Formats an amount with thousands separators and two decimals.
///
/// USD amounts get a leading `$`; other currencies get a trailing code.
///
/// # Example
///
/// ```
/// use playrent_pricing::calculation::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(123450, 2), "USD"), "$1,234.50");
/// assert_eq!(format_currency(Decimal::new(205, 0), "ETB"), "205.00 ETB");
/// ```
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    let rounded = round_money(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    if currency.eq_ignore_ascii_case("USD") {
        format!("{sign}${grouped}.{cents}")
    } else {
        format!("{sign}{grouped}.{cents} {currency}")
    }
}
