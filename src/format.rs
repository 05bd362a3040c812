//! Currency and percentage display helpers.
//!
//! Rounding is half-to-even at `digits` decimal places. A negative `digits`
//! rounds to tens, hundreds, and so on. Non-finite inputs yield `None`.

/// ISO 4217 codes this formatter knows a symbol for.
const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("CNY", "¥"),
    ("INR", "₹"),
    ("RUB", "₽"),
    ("KRW", "₩"),
    ("BRL", "R$"),
    ("AUD", "A$"),
    ("CAD", "C$"),
    ("CHF", "CHF"),
    ("SEK", "kr"),
    ("NOK", "kr"),
    ("DKK", "kr"),
    ("ZAR", "R"),
    ("PLN", "zł"),
    ("MXN", "$"),
    ("IDR", "Rp"),
    ("THB", "฿"),
    ("MYR", "RM"),
    ("PHP", "₱"),
    ("VND", "₫"),
    ("ILS", "₪"),
    ("TRY", "₺"),
    ("HUF", "Ft"),
    ("CZK", "Kč"),
    ("AED", "د.إ"),
    ("SAR", "ر.س"),
    ("EGP", "ج.م"),
    ("NGN", "₦"),
    ("PKR", "₨"),
    ("BDT", "৳"),
    ("UAH", "₴"),
    ("KZT", "₸"),
    ("CLP", "$"),
    ("COP", "$"),
    ("PEN", "S/."),
];

/// Symbol and separator conventions for currency output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyStyle {
    /// An ISO code (`"EUR"`) or a literal symbol (`"€"`).
    pub symbol: String,
    /// Use `.` for thousands and `,` for decimals.
    pub euro_style: bool,
}

impl Default for CurrencyStyle {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            euro_style: false,
        }
    }
}

impl CurrencyStyle {
    pub fn code(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub fn euro(mut self) -> Self {
        self.euro_style = true;
        self
    }

    /// Display prefix: the mapped symbol for a known ISO code, else the text itself.
    pub fn prefix(&self) -> &str {
        let upper = self.symbol.to_uppercase();
        CURRENCY_SYMBOLS
            .iter()
            .find(|(code, _)| *code == upper)
            .map_or(self.symbol.as_str(), |(_, symbol)| *symbol)
    }
}

/// Looks up the symbol for an ISO currency code.
pub fn currency_symbol(code: &str) -> Option<&'static str> {
    let upper = code.to_uppercase();
    CURRENCY_SYMBOLS
        .iter()
        .find(|(c, _)| *c == upper)
        .map(|(_, symbol)| *symbol)
}

/// Formats `amount` as currency, e.g. `1234.567, 2` -> `$1,234.57`.
pub fn format_currency(amount: f64, digits: i32, style: &CurrencyStyle) -> Option<String> {
    if !amount.is_finite() {
        return None;
    }
    let (thousands, decimal) = if style.euro_style {
        ('.', ',')
    } else {
        (',', '.')
    };
    let body = format_magnitude(round_half_even(amount, digits).abs(), digits, thousands, decimal);
    let sign = if amount < 0.0 { "-" } else { "" };
    Some(format!("{sign}{}{body}", style.prefix()))
}

/// Formats a fraction as a percentage, e.g. `0.1234, 2` -> `12.34%`.
pub fn format_percent(value: f64, digits: i32) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let rounded = round_half_even(value * 100.0, digits);
    let body = format_magnitude(rounded.abs(), digits, ',', '.');
    let sign = if rounded < 0.0 { "-" } else { "" };
    Some(format!("{sign}{body}%"))
}

/// An f64 carries at most 17 significant decimal digits.
const MAX_DIGITS: i32 = 17;
/// Beyond this, a power of ten no longer fits in an f64.
const MIN_DIGITS: i32 = -308;

fn round_half_even(value: f64, digits: i32) -> f64 {
    let digits = digits.clamp(MIN_DIGITS, MAX_DIGITS);
    if digits >= 0 {
        let factor = 10f64.powi(digits);
        let scaled = value * factor;
        if !scaled.is_finite() {
            return value;
        }
        scaled.round_ties_even() / factor
    } else {
        let factor = 10f64.powi(-digits);
        (value / factor).round_ties_even() * factor
    }
}

fn format_magnitude(magnitude: f64, digits: i32, thousands: char, decimal: char) -> String {
    let precision = digits.clamp(0, MAX_DIGITS) as usize;
    let text = format!("{magnitude:.precision$}");
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };
    let mut out = group_thousands(int_part, thousands);
    if let Some(frac) = frac_part {
        out.push(decimal);
        out.push_str(frac);
    }
    out
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(amount: f64, digits: i32) -> String {
        format_currency(amount, digits, &CurrencyStyle::default()).unwrap()
    }

    #[test]
    fn currency_rounding_and_grouping() {
        assert_eq!(usd(1234.567, 2), "$1,234.57");
        assert_eq!(usd(12345.67, -2), "$12,300");
        assert_eq!(usd(98765.4321, -3), "$99,000");
        assert_eq!(usd(999.0, 0), "$999");
        assert_eq!(usd(1_000_000.0, 0), "$1,000,000");
    }

    #[test]
    fn currency_rounds_half_to_even() {
        assert_eq!(usd(5.5, 0), "$6");
        assert_eq!(usd(2.5, 0), "$2");
    }

    #[test]
    fn currency_code_and_sign() {
        let eur = CurrencyStyle::code("eur");
        assert_eq!(format_currency(-9876.543, 0, &eur).unwrap(), "-€9,877");
        let custom = CurrencyStyle::code("BTC");
        assert_eq!(format_currency(1.0, 0, &custom).unwrap(), "BTC1");
    }

    #[test]
    fn euro_style_swaps_separators() {
        let style = CurrencyStyle::code("EUR").euro();
        assert_eq!(format_currency(1234.5, 2, &style).unwrap(), "€1.234,50");
    }

    #[test]
    fn percent_examples() {
        assert_eq!(format_percent(0.1234, 2).unwrap(), "12.34%");
        assert_eq!(format_percent(0.9876, 1).unwrap(), "98.8%");
        assert_eq!(format_percent(-0.12345, 1).unwrap(), "-12.3%");
        assert_eq!(format_percent(0.12345, -1).unwrap(), "10%");
        assert_eq!(format_percent(0.6789, -2).unwrap(), "100%");
        assert_eq!(format_percent(12.5, 0).unwrap(), "1,250%");
    }

    #[test]
    fn non_finite_values_are_not_formatted() {
        assert_eq!(format_percent(f64::NAN, 1), None);
        assert_eq!(usd_opt(f64::INFINITY), None);
    }

    #[test]
    fn extreme_digits_are_clamped() {
        assert_eq!(format_percent(0.5, i32::MAX).unwrap(), "50.00000000000000000%");
        assert_eq!(usd(1.0, i32::MIN), "$0");
        assert!(usd(1e300, 10).starts_with("$1,000,000,"));
    }

    fn usd_opt(amount: f64) -> Option<String> {
        format_currency(amount, 0, &CurrencyStyle::default())
    }

    #[test]
    fn symbol_lookup() {
        assert_eq!(currency_symbol("gbp"), Some("£"));
        assert_eq!(currency_symbol("XYZ"), None);
    }
}
