// Numeric canonicalizers: spelled-out amounts, thousands grouping and
// compact "50k" / "2.5M" amounts.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

const ONES: [&str; 20] = [
    "ZERO", "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE", "TEN",
    "ELEVEN", "TWELVE", "THIRTEEN", "FOURTEEN", "FIFTEEN", "SIXTEEN", "SEVENTEEN", "EIGHTEEN",
    "NINETEEN",
];

const TENS: [&str; 10] = [
    "", "", "TWENTY", "THIRTY", "FORTY", "FIFTY", "SIXTY", "SEVENTY", "EIGHTY", "NINETY",
];

const SCALES: [(u64, &str); 3] = [
    (1_000_000_000, "BILLION"),
    (1_000_000, "MILLION"),
    (1_000, "THOUSAND"),
];

lazy_static! {
    static ref COMPACT_AMOUNT: Regex = Regex::new(r"(\d+(?:\.\d+)?)\s*([kKmM])").unwrap();
    static ref NUMBER: Regex = Regex::new(r"\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?").unwrap();
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// All matches of `re` in `text` that do not start right after a word
/// character. A rejected start is retried one character later.
pub(crate) fn unprefixed_captures<'t>(re: &Regex, text: &'t str) -> Vec<Captures<'t>> {
    let mut found = Vec::new();
    let mut pos = 0;
    while pos <= text.len() {
        let Some(caps) = re.captures_at(text, pos) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };
        let start = whole.start();
        if text[..start].chars().next_back().map_or(false, is_word_char) {
            pos = start + text[start..].chars().next().map_or(1, char::len_utf8);
            continue;
        }
        pos = if whole.end() > start { whole.end() } else { start + 1 };
        found.push(caps);
    }
    found
}

fn push_hundreds(mut num: u64, words: &mut Vec<&'static str>) {
    if num >= 100 {
        words.push(ONES[(num / 100) as usize]);
        words.push("HUNDRED");
        num %= 100;
    }
    if num >= 20 {
        words.push(TENS[(num / 10) as usize]);
        num %= 10;
    }
    if num > 0 {
        words.push(ONES[num as usize]);
    }
}

fn push_words(n: u64, words: &mut Vec<&'static str>) {
    let mut remainder = n;
    for (value, name) in SCALES {
        if remainder >= value {
            // Only the billions chunk can exceed 999; it recurses.
            push_words(remainder / value, words);
            words.push(name);
            remainder %= value;
        }
    }
    push_hundreds(remainder, words);
}

/// Upper-case short-scale English words, without "AND".
pub fn int_to_words(n: u64) -> String {
    if n == 0 {
        return "ZERO".to_string();
    }
    let mut words = Vec::new();
    push_words(n, &mut words);
    words.join(" ")
}

/// Spell out a numeric string. Fractional digits are read one by one
/// ("12.5" -> "TWELVE POINT FIVE"). Non-numeric input gives an empty string.
pub fn number_str_to_words(num_str: &str) -> String {
    let raw = num_str.replace(',', "");
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    match raw.split_once('.') {
        Some((whole, frac)) => {
            let whole_words = if whole.is_empty() {
                "ZERO".to_string()
            } else {
                match whole.parse::<u64>() {
                    Ok(value) => int_to_words(value),
                    Err(_) => return String::new(),
                }
            };
            let frac_words: Vec<&str> = frac
                .chars()
                .filter_map(|c| c.to_digit(10))
                .map(|digit| ONES[digit as usize])
                .collect();
            format!("{} POINT {}", whole_words, frac_words.join(" "))
                .trim()
                .to_string()
        }
        None => raw.parse::<u64>().map(int_to_words).unwrap_or_default(),
    }
}

fn group_thousands(value: i128) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Re-insert thousands separators into the integer part. The fractional part
/// is kept as written; a non-numeric integer part returns the trimmed input.
pub fn format_number_str(num_str: &str) -> String {
    let raw = num_str.replace(',', "");
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    let (whole, frac) = raw.split_once('.').unwrap_or((raw, ""));
    let Ok(value) = whole.parse::<i128>() else {
        return num_str.trim().to_string();
    };
    let grouped = group_thousands(value);
    if frac.is_empty() {
        grouped
    } else {
        format!("{}.{}", grouped, frac)
    }
}

/// Expand the first "<number>k" (x1,000) or "<number>m" (x1,000,000) in the
/// text. Empty when there is none.
pub fn parse_compact_amount(text: &str) -> String {
    let Some(caps) = unprefixed_captures(&COMPACT_AMOUNT, text).into_iter().next() else {
        return String::new();
    };
    let Ok(value) = caps[1].parse::<f64>() else {
        return String::new();
    };
    let multiplier = if caps[2].eq_ignore_ascii_case("k") {
        1_000.0
    } else {
        1_000_000.0
    };
    let amount = value * multiplier;
    if amount.fract() == 0.0 && amount < i64::MAX as f64 {
        return format!("{}", amount as i64);
    }
    let fixed = format!("{:.2}", amount);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Longest number-like token on the line; the first one wins a tie.
pub fn find_number_in_line(line: &str) -> String {
    let mut best = "";
    for caps in unprefixed_captures(&NUMBER, line) {
        if let Some(m) = caps.get(0) {
            if m.as_str().len() > best.len() {
                best = m.as_str();
            }
        }
    }
    best.to_string()
}

/// Compact expansion first, otherwise the longest number on the line.
pub fn find_amount_candidate(line: &str) -> String {
    let compact = parse_compact_amount(line);
    if !compact.is_empty() {
        return compact;
    }
    find_number_in_line(line)
}
