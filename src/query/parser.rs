//! Recognises calendar elements in loosely written text.
//!
//! All vocabularies are searched together, longest spelling first, so that a
//! word can never be claimed by a shorter spelling hiding inside it: the
//! star ಪೂರ್ವಾಭಾದ್ರಪದ is not read as the month ಭಾದ್ರಪದ, nor ಶುಕ್ರವಾರ
//! (Friday) as ಶು (Shukla). Every matched spelling is cut out of the text
//! before the next one is looked for.

use regex::Regex;

use super::{Ordinal, Paksha, QueryFields};
use crate::date::Weekday;
use crate::names::{self, Category};

lazy_static::lazy_static! {
    static ref PARENTHETICAL: Regex = Regex::new(r"\([^)]*\)").expect("valid regex");
    static ref SEPARATORS: Regex = Regex::new(r"[-./,_]+").expect("valid regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
    static ref NUMBER: Regex = Regex::new(r"\d+").expect("valid regex");
    static ref NUMERIC_ORDINAL: Regex =
        Regex::new(r"\b(\d+)\s*(ನೇ|st|nd|rd|th)\b").expect("valid regex");
    static ref VOCABULARY: Vec<Spelling> = build_vocabulary();
}

#[derive(Debug, Clone)]
struct Spelling {
    key: String,
    category: Category,
    value: u8,
    /// short spellings only match a whole word
    whole_word: bool,
}

fn build_vocabulary() -> Vec<Spelling> {
    let mut vocabulary: Vec<Spelling> = Category::ALL
        .iter()
        .flat_map(|&category| {
            category
                .spellings()
                .into_iter()
                .map(move |(key, value)| (normalize(&key), category, value))
        })
        .filter(|(key, _, _)| !key.is_empty())
        .map(|(key, category, value)| Spelling {
            whole_word: key.chars().count() <= 2,
            key,
            category,
            value,
        })
        .collect();
    vocabulary.sort_by(|a, b| {
        b.key
            .chars()
            .count()
            .cmp(&a.key.chars().count())
            .then(a.category.cmp(&b.category))
            .then_with(|| a.key.cmp(&b.key))
    });
    vocabulary.dedup_by(|a, b| a.key == b.key && a.category == b.category);
    vocabulary
}

/// Cleans text for matching.
///
/// Drops parenthetical notes, reads Kannada digits as ASCII, turns
/// separators into spaces, lowercases, and collapses whitespace.
///
/// # Example
///
/// ```
/// use seva_calendar::query::normalize;
///
/// assert_eq!("ಮಾಘ ಶು ಷಷ್ಠಿ", normalize("ಮಾಘ.ಶು.ಷಷ್ಠಿ"));
/// assert_eq!("ಜನವರಿ 15", normalize(" ಜನವರಿ-೧೫ (ರಜೆ) "));
/// assert_eq!("january 2", normalize("January,  2"));
/// ```
pub fn normalize(text: &str) -> String {
    let text = PARENTHETICAL.replace_all(text, " ");
    let text: String = text
        .chars()
        .map(|c| match c {
            '\u{0CE6}'..='\u{0CEF}' => {
                char::from(b'0' + (c as u32 - 0x0CE6) as u8)
            }
            _ => c,
        })
        .collect();
    let text = SEPARATORS.replace_all(&text, " ");
    let text = text.to_lowercase();
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Extracts every recognisable calendar element from `text`.
///
/// # Example
///
/// ```
/// use seva_calendar::query::{parse, Paksha};
///
/// let fields = parse("ಮಾಘ.ಶು.ಷಷ್ಠಿ");
/// assert_eq!(Some(11), fields.lunar_month);
/// assert_eq!(Some(Paksha::Shukla), fields.paksha);
/// assert_eq!(Some(6), fields.tithi);
/// assert_eq!(Some("ಮಾಘ"), fields.month_token.as_deref());
/// ```
pub fn parse(text: &str) -> QueryFields {
    let normalized = normalize(text);
    let mut rest = format!(" {normalized} ");
    let mut fields = QueryFields {
        text: normalized,
        ..Default::default()
    };

    let numeric_ordinal = NUMERIC_ORDINAL.captures(&rest).and_then(|caps| {
        let whole = caps.get(0)?;
        let digits = caps.get(1)?.as_str().to_owned();
        Some((whole.range(), digits))
    });
    let numeric_ordinal = numeric_ordinal.map(|(range, digits)| {
        rest.replace_range(range, " ");
        digits
    });

    let mut month_keys: [Option<&str>; 3] = [None; 3];
    for spelling in VOCABULARY.iter() {
        if spelling.category == Category::LunarMonth && fields.star.is_none() {
            // a second lunar month turns an earlier homograph into the star
            if let Some(star) = month_keys[0].and_then(star_homograph) {
                if let Some(pos) = find(&rest, spelling) {
                    rest.replace_range(pos..pos + spelling.key.len(), " ");
                    fields.star = Some(star);
                    fields.lunar_month = Some(spelling.value);
                    month_keys[0] = Some(&spelling.key);
                    continue;
                }
            }
        }
        if is_filled(&fields, spelling.category) {
            continue;
        }
        let Some(pos) = find(&rest, spelling) else {
            continue;
        };
        rest.replace_range(pos..pos + spelling.key.len(), " ");
        assign(&mut fields, spelling.category, spelling.value);
        match spelling.category {
            Category::LunarMonth => month_keys[0] = Some(&spelling.key),
            Category::SolarMonth => month_keys[1] = Some(&spelling.key),
            Category::CivilMonth => month_keys[2] = Some(&spelling.key),
            _ => {}
        }
    }

    // a word naming both a lunar month and a star is the star when another
    // kind of month is given
    let other_month = fields.solar_month.is_some() || fields.civil_month.is_some();
    if let (Some(key), None, true) = (month_keys[0], fields.star, other_month) {
        if let Some(star) = star_homograph(key) {
            fields.star = Some(star);
            fields.lunar_month = None;
            month_keys[0] = None;
        }
    }
    fields.month_token = month_keys.iter().flatten().next().map(|&k| k.to_owned());

    if let Some(m) = NUMBER.find(&rest) {
        read_number(&mut fields, m.as_str(), |fields, n| fields.day_number = Some(n));
    }
    if let Some(digits) = numeric_ordinal {
        if fields.weekday.is_some() && fields.ordinal.is_none() {
            read_number(&mut fields, &digits, |fields, n| match u8::try_from(n) {
                Ok(n @ 1..=5) => fields.ordinal = Some(Ordinal::Nth(n)),
                _ => fields.malformed_number = Some(n.to_string()),
            });
        } else if fields.day_number.is_none() {
            read_number(&mut fields, &digits, |fields, n| fields.day_number = Some(n));
        }
    }
    log::trace!("parsed {:?} as {fields:?}", fields.text);
    fields
}

fn find(haystack: &str, spelling: &Spelling) -> Option<usize> {
    if spelling.whole_word {
        haystack
            .find(&format!(" {} ", spelling.key))
            .map(|pos| pos + 1)
    } else {
        haystack.find(&spelling.key)
    }
}

fn read_number(fields: &mut QueryFields, digits: &str, store: impl FnOnce(&mut QueryFields, u32)) {
    match digits.parse::<u32>() {
        Ok(n) => store(fields, n),
        Err(e) => {
            log::warn!("unreadable number {digits:?} in {:?}: {e}", fields.text);
            fields.malformed_number = Some(digits.to_owned());
        }
    }
}

fn star_homograph(key: &str) -> Option<u8> {
    VOCABULARY
        .iter()
        .find(|s| s.category == Category::Star && s.key == key)
        .map(|s| s.value)
}

fn is_filled(fields: &QueryFields, category: Category) -> bool {
    match category {
        Category::LunarMonth => fields.lunar_month.is_some(),
        Category::SolarMonth => fields.solar_month.is_some(),
        Category::CivilMonth => fields.civil_month.is_some(),
        Category::Star => fields.star.is_some(),
        Category::Paksha => fields.paksha.is_some(),
        Category::Tithi => fields.tithi.is_some(),
        Category::Weekday => fields.weekday.is_some(),
        Category::Ordinal => fields.ordinal.is_some(),
    }
}

fn assign(fields: &mut QueryFields, category: Category, value: u8) {
    match category {
        Category::LunarMonth => fields.lunar_month = Some(value),
        Category::SolarMonth => fields.solar_month = Some(value),
        Category::CivilMonth => fields.civil_month = Some(value),
        Category::Star => fields.star = Some(value),
        Category::Paksha => {
            fields.paksha = Some(if value == 1 {
                Paksha::Shukla
            } else {
                Paksha::Krishna
            })
        }
        Category::Tithi => fields.tithi = Some(value),
        Category::Weekday => fields.weekday = Weekday::from_iso(i32::from(value)),
        Category::Ordinal => {
            fields.ordinal = Some(match value {
                names::LAST => Ordinal::Last,
                n => Ordinal::Nth(n),
            })
        }
    }
}
