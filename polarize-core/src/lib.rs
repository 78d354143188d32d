//! polarize-core: data model for tournament deal splitting

pub mod error;
pub mod level;
pub mod summary;
pub mod tournament;

pub use error::CoreError;
pub use level::PlayerLevel;
pub use summary::{CategoryBreakdown, Summary};
pub use tournament::{BASE_CURRENCY, Category, TournamentFact};

/// Static currency tables shared by the parser and the currency normalizer
pub mod currency {
    use super::BASE_CURRENCY;

    /// Symbol or prefix -> ISO code
    pub type SymbolTable = &'static [(&'static str, &'static str)];

    /// ISO code -> USD per one unit
    pub type RateTable = &'static [(&'static str, f64)];

    /// Multi-character prefixes come first so `R$` wins over `$`.
    pub const SYMBOLS: SymbolTable = &[
        ("HK$", "HKD"),
        ("R$", "BRL"),
        ("C$", "CAD"),
        ("A$", "AUD"),
        ("$", "USD"),
        ("€", "EUR"),
        ("£", "GBP"),
        ("¥", "CNY"),
        ("₩", "KRW"),
        ("₹", "INR"),
    ];

    pub const FALLBACK_RATES: RateTable = &[
        ("EUR", 1.06),
        ("GBP", 1.25),
        ("CAD", 0.73),
        ("AUD", 0.65),
        ("CNY", 0.14),
        ("JPY", 0.0067),
        ("BRL", 0.18),
    ];

    /// Resolve a buy-in prefix to a currency code.
    ///
    /// Empty prefix means dollars. Three-letter codes are taken as-is.
    /// Unknown symbols pass through literally so they surface as "conversion pending".
    pub fn code_for_prefix(prefix: &str, table: SymbolTable) -> String {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return BASE_CURRENCY.to_string();
        }
        if prefix.len() == 3 && prefix.chars().all(|c| c.is_ascii_uppercase()) {
            return prefix.to_string();
        }
        table
            .iter()
            .find(|(symbol, _)| *symbol == prefix)
            .map(|(_, code)| code.to_string())
            .unwrap_or_else(|| prefix.to_string())
    }

    /// Preferred display symbol for a code, falling back to the code itself
    pub fn symbol_for_code(code: &str, table: SymbolTable) -> String {
        table
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(symbol, _)| symbol.to_string())
            .unwrap_or_else(|| format!("{code} "))
    }

    pub fn fallback_rate(code: &str, table: RateTable) -> Option<f64> {
        table.iter().find(|(c, _)| *c == code).map(|(_, r)| *r)
    }

}
