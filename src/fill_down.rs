//! Completes rows that rely on a month named in an earlier row.
//!
//! Sheets often name a month once and list only day numbers or weekday
//! patterns under it. Rows are rewritten in order, carrying the last month
//! seen forward, before any of them is resolved.

use regex::Regex;

use crate::query::{normalize, parse};

lazy_static::lazy_static! {
    static ref BARE_NUMBER: Regex = Regex::new(r"^\d+$").expect("valid regex");
}

/// The running state of the fill-down pass.
#[derive(Debug, Clone, Default)]
pub struct FillDown {
    last_month: Option<String>,
}

impl FillDown {
    /// Rewrites one row and updates the month carried forward.
    ///
    /// # Example
    ///
    /// ```
    /// use seva_calendar::fill_down::FillDown;
    ///
    /// let mut fill = FillDown::default();
    /// assert_eq!("ಜನವರಿ-15", fill.process("ಜನವರಿ-15"));
    /// assert_eq!("ಜನವರಿ-20", fill.process("20"));
    /// assert_eq!("ಜನವರಿ ಕೊನೆಯ ಭಾನುವಾರ", fill.process("ಕೊನೆಯ ಭಾನುವಾರ"));
    /// ```
    pub fn process(&mut self, text: &str) -> String {
        let fields = parse(text);
        if let Some(token) = fields.month_token {
            self.last_month = Some(token);
            return text.to_owned();
        }
        let Some(month) = &self.last_month else {
            return text.to_owned();
        };
        let normalized = normalize(text);
        if BARE_NUMBER.is_match(&normalized) {
            format!("{month}-{normalized}")
        } else if fields.weekday.is_some() || fields.ordinal.is_some() {
            format!("{month} {}", text.trim())
        } else {
            text.to_owned()
        }
    }
}

/// Runs the fill-down pass over rows in order.
pub fn fill_down<'a>(texts: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut state = FillDown::default();
    texts.into_iter().map(|text| state.process(text)).collect()
}
