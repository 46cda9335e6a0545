//! Money and percentage formatting for chart labels, legends and tables.
//!
//! Amounts arrive as decimal numbers and are shown with two fraction digits,
//! locale-specific separators and a currency symbol.

/// Format an amount without sign, e.g. `$1,234.50`.
pub fn format_amount(amount: f64, currency: &str, locale: &str) -> String {
    let (whole, fractional) = split_cents(amount);
    let (thousands_sep, decimal_sep) = locale_separators(locale);
    format!(
        "{}{}{}{:02}",
        currency_symbol(currency),
        format_with_thousands(whole, thousands_sep),
        decimal_sep,
        fractional
    )
}

/// Format a difference with an explicit sign, e.g. `+$20.00` or `-$35.00`.
/// Zero is shown as a gain, matching how deltas are colored.
pub fn format_delta(amount: f64, currency: &str, locale: &str) -> String {
    let sign = if amount < 0.0 && to_cents(amount) != 0 {
        "-"
    } else {
        "+"
    };
    format!("{}{}", sign, format_amount(amount, currency, locale))
}

/// Format a share with one decimal, e.g. `12.5%` or `12,5%`.
pub fn format_share(value: f64, locale: &str) -> String {
    let (_, decimal_sep) = locale_separators(locale);
    let tenths = (value.abs() * 10.0).round() as i64;
    let sign = if value < 0.0 && tenths != 0 { "-" } else { "" };
    format!("{}{}{}{}%", sign, tenths / 10, decimal_sep, tenths % 10)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

fn split_cents(amount: f64) -> (i64, i64) {
    let abs_cents = to_cents(amount).abs();
    (abs_cents / 100, abs_cents % 100)
}

/// Get thousands and decimal separators based on locale.
fn locale_separators(locale: &str) -> (char, char) {
    match locale {
        "de-DE" | "de-AT" | "de-CH" | "fr-FR" | "fr-BE" | "fr-CA" | "es-ES" | "es-AR" | "it-IT"
        | "pt-BR" | "pt-PT" | "nl-NL" | "nl-BE" | "pl-PL" | "ru-RU" | "tr-TR" | "vi-VN"
        | "id-ID" | "da-DK" | "nb-NO" | "sv-SE" | "fi-FI" | "cs-CZ" | "sk-SK" | "hu-HU"
        | "ro-RO" | "bg-BG" | "uk-UA" | "el-GR" => ('.', ','),
        _ => (',', '.'),
    }
}

fn format_with_thousands(n: i64, sep: char) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}

fn currency_symbol(currency: &str) -> &'static str {
    match currency.to_uppercase().as_str() {
        "USD" => "$",
        "EUR" => "\u{20ac}",
        "GBP" => "\u{00a3}",
        "JPY" | "CNY" => "\u{00a5}",
        "CAD" => "C$",
        "AUD" => "A$",
        "CHF" => "CHF\u{00a0}",
        "INR" => "\u{20b9}",
        "BRL" => "R$",
        "MXN" => "MX$",
        "KRW" => "\u{20a9}",
        "SEK" | "NOK" | "DKK" => "kr\u{00a0}",
        "PLN" => "z\u{0142}\u{00a0}",
        "ZAR" => "R\u{00a0}",
        "SGD" => "S$",
        "HKD" => "HK$",
        "NZD" => "NZ$",
        _ => "$",
    }
}
