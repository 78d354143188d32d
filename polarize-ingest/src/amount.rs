//! Locale-tolerant money amounts: "1,234.56", "1.234,56", "100,00", "5.5".

/// Parse an amount written with either `.` or `,` as the decimal separator.
///
/// When both separators appear, the last one is the decimal point and the
/// other is a thousands separator. A lone `,` followed by exactly three digits
/// is read as a thousands separator ("1,500" is fifteen hundred).
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    let s = cleaned.trim_end_matches(['.', ',']);
    if s.is_empty() {
        return None;
    }

    let normalized = match (s.rfind('.'), s.rfind(',')) {
        (Some(dot), Some(comma)) => {
            let (decimal, thousands) = if dot > comma { ('.', ',') } else { (',', '.') };
            s.replace(thousands, "").replace(decimal, ".")
        }
        (None, Some(_)) => single_separator(s, ','),
        (Some(_), None) => single_separator(s, '.'),
        (None, None) => s.to_string(),
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn single_separator(s: &str, sep: char) -> String {
    if s.matches(sep).count() > 1 {
        return s.replace(sep, "");
    }
    let digits_after = s.rsplit(sep).next().map(str::len).unwrap_or(0);
    if sep == ',' && digits_after == 3 {
        s.replace(sep, "")
    } else {
        s.replace(sep, ".")
    }
}
