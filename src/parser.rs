use chrono::NaiveDate;
use crate::model::SaleRecord;

// Lines checked for a price, counting the date line itself.
const PRICE_LOOKAHEAD_LINES: usize = 6;

/// Extract sale records from a raw marketplace paste.
///
/// Each non-empty line is checked for an `MM/DD/YY` date; a matching line
/// then scans itself and the next few lines for a `£1,234`-style price.
/// Malformed dates and missing prices produce no record and no error.
/// `today` anchors the two-digit-year pivot.
///
/// Output order follows input line order, not chronological order.
pub fn parse(raw_text: &str, today: NaiveDate) -> Vec<SaleRecord> {
    let lines: Vec<&str> = raw_text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut records = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let date = match find_date(lines[i], today) {
            Some(d) => d,
            None => {
                i += 1;
                continue;
            }
        };

        let window_end = (i + PRICE_LOOKAHEAD_LINES).min(lines.len());
        let hit = (i..window_end).find_map(|j| find_price(lines[j]).map(|p| (j, p)));

        match hit {
            Some((j, price)) => {
                records.push(SaleRecord { date, price });
                i = j + 1;
            }
            // Date abandoned; the next line may start its own scan.
            None => i += 1,
        }
    }

    records
}

/// Find the first `DD/DD/DD`-shaped token and read it as `MM/DD/YY`.
///
/// Only the first date-shaped token on a line is considered; if it is not
/// a real calendar date the whole line is rejected. A resolved date after
/// `today` is rolled back one century (sales history cannot be in the
/// future), and only once.
fn find_date(line: &str, today: NaiveDate) -> Option<NaiveDate> {
    let b = line.as_bytes();
    if b.len() < 8 {
        return None;
    }

    for start in 0..=(b.len() - 8) {
        let w = &b[start..start + 8];
        let shaped = w[0].is_ascii_digit()
            && w[1].is_ascii_digit()
            && w[2] == b'/'
            && w[3].is_ascii_digit()
            && w[4].is_ascii_digit()
            && w[5] == b'/'
            && w[6].is_ascii_digit()
            && w[7].is_ascii_digit();
        if !shaped {
            continue;
        }

        let month = ((w[0] - b'0') as u32) * 10 + (w[1] - b'0') as u32;
        let day = ((w[3] - b'0') as u32) * 10 + (w[4] - b'0') as u32;
        let yy = ((w[6] - b'0') as i32) * 10 + (w[7] - b'0') as i32;

        let date = NaiveDate::from_ymd_opt(2000 + yy, month, day)?;
        return if date > today {
            NaiveDate::from_ymd_opt(1900 + yy, month, day)
        } else {
            Some(date)
        };
    }

    None
}

/// Find the first `£`-prefixed amount on a line.
///
/// Accepts optional whitespace after the symbol and comma thousands
/// separators; the amount must be a positive whole number of pounds.
/// A `£` with no usable digits is ignored and the scan continues.
fn find_price(line: &str) -> Option<f64> {
    for (pos, ch) in line.char_indices() {
        if ch != '£' {
            continue;
        }
        let rest = line[pos + ch.len_utf8()..].trim_start();
        let digits: String = rest
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == ',')
            .filter(|c| c.is_ascii_digit())
            .collect();
        if digits.is_empty() {
            continue;
        }
        if let Ok(value) = digits.parse::<f64>() {
            if value > 0.0 {
                return Some(value);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    const TODAY: fn() -> NaiveDate = || d(2024, 3, 1);

    #[test]
    fn date_then_price_on_next_line() {
        let recs = parse("02/15/24\n£110", TODAY());
        assert_eq!(recs, vec![SaleRecord { date: d(2024, 2, 15), price: 110.0 }]);
    }

    #[test]
    fn date_and_price_on_same_line() {
        let recs = parse("Sold 02/15/24 for £1,250 (UK 9.5)", TODAY());
        assert_eq!(recs, vec![SaleRecord { date: d(2024, 2, 15), price: 1250.0 }]);
    }

    #[test]
    fn price_beyond_lookahead_is_not_claimed() {
        // Five filler lines push the price to the 7th line of the scan.
        let text = "02/15/24\na\nb\nc\nd\ne\n£110";
        assert!(parse(text, TODAY()).is_empty());
    }

    #[test]
    fn price_at_window_edge_is_claimed() {
        let text = "02/15/24\na\nb\nc\nd\n£110";
        assert_eq!(parse(text, TODAY()).len(), 1);
    }

    #[test]
    fn abandoned_date_does_not_corrupt_later_records() {
        // First date never finds a price; the second pair still parses.
        let text = "01/05/24\nno price here\nsize 9\nfoo\nbar\nbaz\n02/15/24\n£110";
        let recs = parse(text, TODAY());
        assert_eq!(recs, vec![SaleRecord { date: d(2024, 2, 15), price: 110.0 }]);
    }

    #[test]
    fn first_date_claims_the_next_price() {
        // Two dates before one price: the earlier scan consumes it.
        let text = "01/05/24\n02/15/24\n£110";
        let recs = parse(text, TODAY());
        assert_eq!(recs, vec![SaleRecord { date: d(2024, 1, 5), price: 110.0 }]);
    }

    #[test]
    fn future_date_rolls_back_one_century() {
        let recs = parse("12/31/24\n£50", d(2024, 3, 1));
        assert_eq!(recs[0].date, d(1924, 12, 31));
    }

    #[test]
    fn rollback_never_produces_a_future_date() {
        let today = d(2026, 8, 24);
        for text in ["12/31/26\n£50", "01/01/27\n£50", "06/30/99\n£50"] {
            let recs = parse(text, today);
            assert_eq!(recs.len(), 1);
            assert!(recs[0].date <= today);
        }
    }

    #[test]
    fn today_is_not_rolled_back() {
        let recs = parse("03/01/24\n£50", d(2024, 3, 1));
        assert_eq!(recs[0].date, d(2024, 3, 1));
    }

    #[test]
    fn malformed_date_is_skipped_silently() {
        // 13/45/24 is date-shaped but not a real date.
        let recs = parse("13/45/24\n£110\n02/15/24\n£90", TODAY());
        assert_eq!(recs, vec![SaleRecord { date: d(2024, 2, 15), price: 90.0 }]);
    }

    #[test]
    fn comma_separators_and_spaces_are_accepted() {
        let recs = parse("02/15/24\n£ 1,234", TODAY());
        assert_eq!(recs[0].price, 1234.0);
    }

    #[test]
    fn zero_price_is_not_a_sale() {
        assert!(parse("02/15/24\n£0", TODAY()).is_empty());
    }

    #[test]
    fn pound_sign_without_digits_is_ignored() {
        let recs = parse("02/15/24\nprice in £ sterling\n£98", TODAY());
        assert_eq!(recs[0].price, 98.0);
    }

    #[test]
    fn parse_is_idempotent() {
        let text = "02/15/24\n£110\njunk\n02/01/24\nUK 10\n£90";
        assert_eq!(parse(text, TODAY()), parse(text, TODAY()));
    }
}
