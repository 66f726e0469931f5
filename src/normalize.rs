//! Locale-tolerant coercion of raw cells into numbers and ISO dates

use nom::{
    bytes::complete::take_while_m_n,
    character::complete::one_of,
    combinator::eof,
    IResult, Parser,
};

/// Parse a money or multiplier cell written in either German or English style.
///
/// Currency symbols and whitespace are ignored. When both `,` and `.` occur,
/// the rightmost one is the decimal separator. A lone `,` is a decimal comma
/// unless the digits around it form thousands groups (`1,234`). Anything that
/// still fails to parse becomes `0.0`, and negative values clamp to `0.0`.
pub fn normalize_number(raw: &str) -> f64 {
    let s: String = raw
        .chars()
        .filter(|c| !matches!(c, '€' | '$' | '£') && !c.is_whitespace())
        .collect();

    let has_comma = s.contains(',');
    let has_dot = s.contains('.');

    let cleaned = if has_comma && has_dot {
        let last_comma = s.rfind(',').unwrap_or(0);
        let last_dot = s.rfind('.').unwrap_or(0);
        let (decimal, thousands) = if last_comma > last_dot { (',', '.') } else { ('.', ',') };
        s.replace(thousands, "").replacen(decimal, ".", 1)
    } else if has_comma {
        if is_thousands_grouping(&s) {
            s.replace(',', "")
        } else {
            s.replacen(',', ".", 1)
        }
    } else {
        s.replace(',', "")
    };

    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() => n.max(0.0),
        _ => 0.0,
    }
}

/// `1,234` or `12,345,678`: a 1-3 digit lead group followed by 3-digit groups
fn is_thousands_grouping(s: &str) -> bool {
    let unsigned = s.strip_prefix(|c| c == '-' || c == '+').unwrap_or(s);
    let mut groups = unsigned.split(',');

    let lead = match groups.next() {
        Some(g) => g,
        None => return false,
    };
    if lead.is_empty() || lead.len() > 3 || lead.starts_with('0') {
        return false;
    }
    if !lead.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let mut rest = groups.peekable();
    if rest.peek().is_none() {
        return false;
    }
    rest.all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()))
}

fn digits(min: usize, max: usize) -> impl FnMut(&str) -> IResult<&str, &str> {
    move |input| take_while_m_n(min, max, |c: char| c.is_ascii_digit()).parse(input)
}

/// Parse `D.M.YYYY` (also `-` or `/` separators) into `(day, month, year)`
fn day_month_year(input: &str) -> IResult<&str, (&str, &str, &str)> {
    let (input, day) = digits(1, 2)(input)?;
    let (input, _) = one_of("./-").parse(input)?;
    let (input, month) = digits(1, 2)(input)?;
    let (input, _) = one_of("./-").parse(input)?;
    let (input, year) = digits(4, 4)(input)?;
    let (input, _) = eof.parse(input)?;
    Ok((input, (day, month, year)))
}

/// Reorder a day-first date into `YYYY-MM-DD`.
///
/// Input that does not look like a day-first date is returned trimmed but
/// otherwise untouched, so ISO dates and free text pass through.
pub fn normalize_date(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return String::new();
    }

    match day_month_year(s) {
        Ok((_, (day, month, year))) => format!("{}-{:0>2}-{:0>2}", year, month, day),
        Err(_) => s.to_string(),
    }
}
