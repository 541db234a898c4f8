use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use ynabify_core::Lenient;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

const MONTH_NAMES: &str =
    "january|february|march|april|may|june|july|august|september|october|november|december";

re!(re_two_two_four_dash, r"^[0-9]{2}-[0-9]{2}-[0-9]{4}$");
re!(re_two_two_four_slash, r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$");
re!(re_four_two_two_dash, r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$");

fn re_month_day_year_long() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| {
        Regex::new(&format!(r"^(?i:{MONTH_NAMES}) [0-9]{{1,2}}, [0-9]{{4}}$")).expect("invalid regex")
    })
}

fn re_day_month_year_long() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| {
        Regex::new(&format!(r"^[0-9]{{1,2}} (?i:{MONTH_NAMES}) [0-9]{{4}}$")).expect("invalid regex")
    })
}

// ── Layouts ──────────────────────────────────────────────────────────────────

/// Date layouts accepted in the source export, in the order they are tried.
///
/// The order settles ambiguous input: `01/02/2024` is read as 1 February
/// because day-first slash comes before month-first slash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLayout {
    /// `31-12-2023`
    DayMonthYearDash,
    /// `31/12/2023`
    DayMonthYearSlash,
    /// `2023-12-31`
    YearMonthDayDash,
    /// `12/31/2023`
    MonthDayYearSlash,
    /// `December 31, 2023`
    MonthNameDayYear,
    /// `31 December 2023`
    DayMonthNameYear,
}

impl DateLayout {
    pub const PRIORITY: [DateLayout; 6] = [
        DateLayout::DayMonthYearDash,
        DateLayout::DayMonthYearSlash,
        DateLayout::YearMonthDayDash,
        DateLayout::MonthDayYearSlash,
        DateLayout::MonthNameDayYear,
        DateLayout::DayMonthNameYear,
    ];

    fn shape(self) -> &'static Regex {
        match self {
            DateLayout::DayMonthYearDash => re_two_two_four_dash(),
            DateLayout::DayMonthYearSlash | DateLayout::MonthDayYearSlash => re_two_two_four_slash(),
            DateLayout::YearMonthDayDash => re_four_two_two_dash(),
            DateLayout::MonthNameDayYear => re_month_day_year_long(),
            DateLayout::DayMonthNameYear => re_day_month_year_long(),
        }
    }

    fn chrono_format(self) -> &'static str {
        match self {
            DateLayout::DayMonthYearDash => "%d-%m-%Y",
            DateLayout::DayMonthYearSlash => "%d/%m/%Y",
            DateLayout::YearMonthDayDash => "%Y-%m-%d",
            DateLayout::MonthDayYearSlash => "%m/%d/%Y",
            DateLayout::MonthNameDayYear => "%B %d, %Y",
            DateLayout::DayMonthNameYear => "%d %B %Y",
        }
    }

    /// Parses the whole of `s` in this layout, rejecting impossible calendar dates.
    pub fn parse(self, s: &str) -> Option<NaiveDate> {
        if !self.shape().is_match(s) {
            return None;
        }
        NaiveDate::parse_from_str(s, self.chrono_format()).ok()
    }
}

/// Tries every layout in priority order; the first that parses wins.
/// Unparseable text is handed back untouched. Renders as `YYYY-MM-DD`.
pub fn normalize_date(raw: &str) -> Lenient<NaiveDate> {
    DateLayout::PRIORITY
        .iter()
        .find_map(|layout| layout.parse(raw))
        .map_or_else(|| Lenient::PassedThrough(raw.to_string()), Lenient::Parsed)
}
