use rust_decimal::Decimal;

/// Convert a provider price (JSON float) into a Decimal for valuation.
/// Returns None for values a Decimal cannot represent (NaN, infinities).
pub fn decimal_from_price(price: f64) -> Option<Decimal> {
    Decimal::from_f64_retain(price)
}

/// Text before the first line break of a coin description.
pub fn first_paragraph(text: &str) -> &str {
    text.split('\n').next().unwrap_or(text)
}
