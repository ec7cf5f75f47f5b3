use chrono::{Datelike, NaiveDate, Utc};

/// Parse ett datum från en sträng (flexibelt format)
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Försök olika format
    let formats = [
        "%Y-%m-%d",    // 2024-01-15
        "%Y/%m/%d",    // 2024/01/15
        "%d-%m-%Y",    // 15-01-2024
        "%d/%m/%Y",    // 15/01/2024
        "%Y%m%d",      // 20240115
    ];

    for format in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    // Försök tolka endast år
    if s.len() == 4 {
        if let Ok(year) = s.parse::<i32>() {
            return NaiveDate::from_ymd_opt(year, 1, 1);
        }
    }

    None
}

/// Formatera ett datum för visning
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Dagens datum (lokal kalender ignoreras, UTC räcker för åldrar)
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Högsta ålder som går att ange för en medlem
pub const MAX_AGE: u32 = 150;

/// Beräkna ålder i hela år, aldrig negativ
pub fn calculate_age(birth: NaiveDate, end: NaiveDate) -> u32 {
    let mut age = end.year() - birth.year();
    if (end.month(), end.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

/// Födelsedatum som motsvarar en angiven ålder (1 januari det året).
/// `None` om året hamnar utanför kalendern.
pub fn birth_date_for_age(age: u32, today: NaiveDate) -> Option<NaiveDate> {
    let age = i32::try_from(age).ok()?;
    let year = today.year().checked_sub(age)?;
    NaiveDate::from_ymd_opt(year, 1, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-15"),
            Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
        assert_eq!(
            parse_date("2024"),
            Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("invalid"), None);
    }

    #[test]
    fn test_calculate_age() {
        let birth = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(calculate_age(birth, end), 33);

        let end2 = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(calculate_age(birth, end2), 34);

        // Födelsedatum i framtiden ger 0
        let future = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert_eq!(calculate_age(future, end), 0);
    }

    #[test]
    fn test_calculate_age_across_leap_years() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();

        assert_eq!(calculate_age(date(2000, 3, 1), date(2025, 3, 1)), 25);
        assert_eq!(calculate_age(date(2000, 12, 31), date(2025, 12, 31)), 25);
        assert_eq!(calculate_age(date(2001, 3, 1), date(2024, 3, 1)), 23);
        assert_eq!(calculate_age(date(2000, 3, 1), date(2025, 2, 28)), 24);

        // Skottdagsbarn fyller år först 1 mars ett vanligt år
        assert_eq!(calculate_age(date(2000, 2, 29), date(2025, 2, 28)), 24);
        assert_eq!(calculate_age(date(2000, 2, 29), date(2025, 3, 1)), 25);
    }

    #[test]
    fn test_birth_date_for_age_roundtrips() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let birth = birth_date_for_age(40, today).unwrap();
        assert_eq!(birth, NaiveDate::from_ymd_opt(1986, 1, 1).unwrap());
        assert_eq!(calculate_age(birth, today), 40);
    }

    #[test]
    fn test_birth_date_for_huge_age() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        assert_eq!(birth_date_for_age(2_147_484_000, today), None);
        assert_eq!(birth_date_for_age(u32::MAX, today), None);
        assert_eq!(birth_date_for_age(1_000_000, today), None);
    }
}
