/// Supported tickers and their CoinGecko coin identifiers. Fixed at compile
/// time; anything outside this set is an unsupported cryptocurrency.
pub const COIN_IDS: [(&str, &str); 10] = [
    ("BTC", "bitcoin"),
    ("ETH", "ethereum"),
    ("USDT", "tether"),
    ("BNB", "binancecoin"),
    ("SOL", "solana"),
    ("XRP", "ripple"),
    ("ADA", "cardano"),
    ("DOGE", "dogecoin"),
    ("DOT", "polkadot"),
    ("MATIC", "matic-network"),
];

/// Resolve a ticker (any case) to its provider id.
pub fn provider_id(symbol: &str) -> Option<&'static str> {
    let upper = symbol.to_uppercase();
    COIN_IDS
        .iter()
        .find(|(ticker, _)| *ticker == upper)
        .map(|(_, id)| *id)
}

pub fn supported_symbols() -> Vec<&'static str> {
    COIN_IDS.iter().map(|(ticker, _)| *ticker).collect()
}
