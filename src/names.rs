//! Names of calendar elements, as written on observance sheets.
//!
//! Each table pairs a spelling with the number it stands for. Variant
//! spellings share a number; the first spelling listed for a number is its
//! display name.

/// The kind of calendar element a word names.
///
/// The declaration order is the precedence used when two categories claim
/// an equally long word.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Category {
    LunarMonth,
    SolarMonth,
    CivilMonth,
    Star,
    Paksha,
    Tithi,
    Weekday,
    Ordinal,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::LunarMonth,
        Category::SolarMonth,
        Category::CivilMonth,
        Category::Star,
        Category::Paksha,
        Category::Tithi,
        Category::Weekday,
        Category::Ordinal,
    ];

    /// Every spelling in this category, suffixed forms included.
    pub fn spellings(self) -> Vec<(String, u8)> {
        let base = self.table().iter().map(|&(s, v)| (s.to_owned(), v));
        match self {
            Category::LunarMonth | Category::SolarMonth => base
                .flat_map(|(s, v)| {
                    [
                        (format!("{s}ಮಾಸ"), v),
                        (format!("{s} ಮಾಸ"), v),
                        (s, v),
                    ]
                })
                .collect(),
            Category::Star => base
                .flat_map(|(s, v)| {
                    [
                        (format!("{s}ನಕ್ಷತ್ರ"), v),
                        (format!("{s} ನಕ್ಷತ್ರ"), v),
                        (s, v),
                    ]
                })
                .collect(),
            _ => base.collect(),
        }
    }

    fn table(self) -> &'static [(&'static str, u8)] {
        match self {
            Category::LunarMonth => LUNAR_MONTHS,
            Category::SolarMonth => SOLAR_MONTHS,
            Category::CivilMonth => CIVIL_MONTHS,
            Category::Star => STARS,
            Category::Paksha => PAKSHAS,
            Category::Tithi => TITHIS,
            Category::Weekday => WEEKDAYS,
            Category::Ordinal => ORDINALS,
        }
    }
}

/// Chaitra = 1 … Phalguna = 12.
pub const LUNAR_MONTHS: &[(&str, u8)] = &[
    ("ಚೈತ್ರ", 1),
    ("ವೈಶಾಖ", 2),
    ("ಜ್ಯೇಷ್ಠ", 3),
    ("ಆಷಾಢ", 4),
    ("ಶ್ರಾವಣ", 5),
    ("ಭಾದ್ರಪದ", 6),
    ("ಆಶ್ವಯುಜ", 7),
    ("ಆಶ್ವೀಜ", 7),
    ("ಕಾರ್ತಿಕ", 8),
    ("ಮಾರ್ಗಶಿರ", 9),
    ("ಮಾರ್ಗಶೀರ್ಷ", 9),
    ("ಪುಷ್ಯ", 10),
    ("ಪೌಷ", 10),
    ("ಮಾಘ", 11),
    ("ಫಾಲ್ಗುಣ", 12),
];

/// Mesha = 1 … Meena = 12, the sidereal signs from Aries.
pub const SOLAR_MONTHS: &[(&str, u8)] = &[
    ("ಮೇಷ", 1),
    ("ವೃಷಭ", 2),
    ("ಮಿಥುನ", 3),
    ("ಕರ್ಕಾಟಕ", 4),
    ("ಕಟಕ", 4),
    ("ಸಿಂಹ", 5),
    ("ಕನ್ಯಾ", 6),
    ("ಕನ್ಯೆ", 6),
    ("ತುಲಾ", 7),
    ("ವೃಶ್ಚಿಕ", 8),
    ("ಧನು", 9),
    ("ಮಕರ", 10),
    ("ಕುಂಭ", 11),
    ("ಮೀನ", 12),
];

pub const CIVIL_MONTHS: &[(&str, u8)] = &[
    ("ಜನವರಿ", 1),
    ("ಫೆಬ್ರವರಿ", 2),
    ("ಮಾರ್ಚ್", 3),
    ("ಮಾರ್ಚ", 3),
    ("ಏಪ್ರಿಲ್", 4),
    ("ಎಪ್ರಿಲ್", 4),
    ("ಮೇ", 5),
    ("ಜೂನ್", 6),
    ("ಜುಲೈ", 7),
    ("ಆಗಸ್ಟ್", 8),
    ("ಅಗೋಸ್ತು", 8),
    ("ಸೆಪ್ಟೆಂಬರ್", 9),
    ("ಸೆಪ್ಟಂಬರ್", 9),
    ("ಅಕ್ಟೋಬರ್", 10),
    ("ಒಕ್ಟೋಬರ್", 10),
    ("ನವೆಂಬರ್", 11),
    ("ಡಿಸೆಂಬರ್", 12),
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
];

/// Ashwini = 1 … Revati = 27.
pub const STARS: &[(&str, u8)] = &[
    ("ಅಶ್ವಿನಿ", 1),
    ("ಭರಣಿ", 2),
    ("ಕೃತ್ತಿಕಾ", 3),
    ("ಕೃತ್ತಿಕೆ", 3),
    ("ರೋಹಿಣಿ", 4),
    ("ಮೃಗಶಿರ", 5),
    ("ಆರ್ದ್ರಾ", 6),
    ("ಆರಿದ್ರಾ", 6),
    ("ಪುನರ್ವಸು", 7),
    ("ಪುಷ್ಯ", 8),
    ("ಆಶ್ಲೇಷ", 9),
    ("ಮಘಾ", 10),
    ("ಮಖ", 10),
    ("ಪುಬ್ಬ", 11),
    ("ಹುಬ್ಬ", 11),
    ("ಉತ್ತರಾ", 12),
    ("ಉತ್ತರ", 12),
    ("ಹಸ್ತ", 13),
    ("ಚಿತ್ರಾ", 14),
    ("ಚಿತ್ತ", 14),
    ("ಸ್ವಾತಿ", 15),
    ("ವಿಶಾಖ", 16),
    ("ಅನುರಾಧ", 17),
    ("ಜ್ಯೇಷ್ಠಾ", 18),
    ("ಮೂಲ", 19),
    ("ಪೂರ್ವಾಷಾಢ", 20),
    ("ಪೂ.ಷಾ", 20),
    ("ಉತ್ತರಾಷಾಢ", 21),
    ("ಉ.ಷಾ", 21),
    ("ಶ್ರವಣ", 22),
    ("ಧನಿಷ್ಠ", 23),
    ("ಶತಭಿಷ", 24),
    ("ಪೂರ್ವಾಭಾದ್ರಪದ", 25),
    ("ಪೂರ್ವಾಭಾದ್ರ", 25),
    ("ಪೂ.ಭಾ", 25),
    ("ಉತ್ತರಾಭಾದ್ರಪದ", 26),
    ("ಉತ್ತರಾಭಾದ್ರ", 26),
    ("ಉ.ಭಾ", 26),
    ("ರೇವತಿ", 27),
];

/// Shukla = 1, Krishna = 2.
pub const PAKSHAS: &[(&str, u8)] = &[
    ("ಶುಕ್ಲ", 1),
    ("ಶುದ್ಧ", 1),
    ("ಶು", 1),
    ("ಕೃಷ್ಣ", 2),
    ("ಬಹುಳ", 2),
    ("ಕೃ", 2),
    ("ಬ", 2),
];

/// Day within the fortnight; the new moon is 30.
pub const TITHIS: &[(&str, u8)] = &[
    ("ಪ್ರತಿಪದೆ", 1),
    ("ಪಾಡ್ಯ", 1),
    ("ಬಿದಿಗೆ", 2),
    ("ದ್ವಿತೀಯ", 2),
    ("ತದಿಗೆ", 3),
    ("ತೃತೀಯ", 3),
    ("ಚೌತಿ", 4),
    ("ಚತುರ್ಥಿ", 4),
    ("ಪಂಚಮಿ", 5),
    ("ಷಷ್ಠಿ", 6),
    ("ಸಪ್ತಮಿ", 7),
    ("ಅಷ್ಟಮಿ", 8),
    ("ನವಮಿ", 9),
    ("ದಶಮಿ", 10),
    ("ಏಕಾದಶಿ", 11),
    ("ದ್ವಾದಶಿ", 12),
    ("ತ್ರಯೋದಶಿ", 13),
    ("ಚತುರ್ದಶಿ", 14),
    ("ಹುಣ್ಣಿಮೆ", 15),
    ("ಪೂರ್ಣಿಮೆ", 15),
    ("ಅಮಾವಾಸ್ಯೆ", 30),
    ("ಅಮಾಸೆ", 30),
];

/// ISO numbering, Monday = 1.
pub const WEEKDAYS: &[(&str, u8)] = &[
    ("ಸೋಮವಾರ", 1),
    ("ಮಂಗಳವಾರ", 2),
    ("ಬುಧವಾರ", 3),
    ("ಗುರುವಾರ", 4),
    ("ಬೃಹಸ್ಪತಿವಾರ", 4),
    ("ಶುಕ್ರವಾರ", 5),
    ("ಶನಿವಾರ", 6),
    ("ಭಾನುವಾರ", 7),
    ("ರವಿವಾರ", 7),
    ("monday", 1),
    ("tuesday", 2),
    ("wednesday", 3),
    ("thursday", 4),
    ("friday", 5),
    ("saturday", 6),
    ("sunday", 7),
];

/// `LAST` stands for the last occurrence in a month.
pub const ORDINALS: &[(&str, u8)] = &[
    ("ಮೊದಲನೇ", 1),
    ("ಮೊದಲ", 1),
    ("ಒಂದನೇ", 1),
    ("ಎರಡನೇ", 2),
    ("ಮೂರನೇ", 3),
    ("ನಾಲ್ಕನೇ", 4),
    ("ಐದನೇ", 5),
    ("ಕೊನೆಯ", LAST),
    ("ಕಡೆಯ", LAST),
    ("first", 1),
    ("second", 2),
    ("third", 3),
    ("fourth", 4),
    ("fifth", 5),
    ("last", LAST),
];

pub const LAST: u8 = 0;

fn display(table: &'static [(&'static str, u8)], num: u8) -> Option<&'static str> {
    table.iter().find(|&&(_, v)| v == num).map(|&(s, _)| s)
}

/// Display name of lunar month `1..=12`.
///
/// # Example
///
/// ```
/// use seva_calendar::names;
///
/// assert_eq!(Some("ಮಾಘ"), names::lunar_month(11));
/// assert_eq!(None, names::lunar_month(13));
/// ```
pub fn lunar_month(num: u8) -> Option<&'static str> {
    display(LUNAR_MONTHS, num)
}

/// Display name of solar month `1..=12`.
pub fn solar_month(num: u8) -> Option<&'static str> {
    display(SOLAR_MONTHS, num)
}

/// Display name of star `1..=27`.
pub fn star(num: u8) -> Option<&'static str> {
    display(STARS, num)
}

/// Display name of a tithi within its fortnight, `1..=15` or `30`.
pub fn tithi(num: u8) -> Option<&'static str> {
    display(TITHIS, num)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn numbers(table: &[(&str, u8)]) -> HashSet<u8> {
        table.iter().map(|&(_, v)| v).collect()
    }

    #[test]
    fn tables_are_complete() {
        assert_eq!((1..=12).collect::<HashSet<_>>(), numbers(LUNAR_MONTHS));
        assert_eq!((1..=12).collect::<HashSet<_>>(), numbers(SOLAR_MONTHS));
        assert_eq!((1..=12).collect::<HashSet<_>>(), numbers(CIVIL_MONTHS));
        assert_eq!((1..=27).collect::<HashSet<_>>(), numbers(STARS));
        assert_eq!((1..=7).collect::<HashSet<_>>(), numbers(WEEKDAYS));
        let mut tithis: HashSet<u8> = (1..=15).collect();
        tithis.insert(30);
        assert_eq!(tithis, numbers(TITHIS));
    }

    #[test]
    fn display_names() {
        assert_eq!(Some("ಚೈತ್ರ"), lunar_month(1));
        assert_eq!(Some("ಆಶ್ವಯುಜ"), lunar_month(7));
        assert_eq!(Some("ಸಿಂಹ"), solar_month(5));
        assert_eq!(Some("ಕೃತ್ತಿಕಾ"), star(3));
        assert_eq!(Some("ಅಮಾವಾಸ್ಯೆ"), tithi(30));
        assert_eq!(None, star(0));
    }

    #[test]
    fn suffixed_spellings() {
        let months = Category::LunarMonth.spellings();
        assert!(months.contains(&("ಮಾಘಮಾಸ".to_owned(), 11)));
        assert!(months.contains(&("ಮಾಘ ಮಾಸ".to_owned(), 11)));
        assert!(months.contains(&("ಮಾಘ".to_owned(), 11)));
        let stars = Category::Star.spellings();
        assert!(stars.contains(&("ಪುಷ್ಯ ನಕ್ಷತ್ರ".to_owned(), 8)));
        assert_eq!(PAKSHAS.len(), Category::Paksha.spellings().len());
    }
}
