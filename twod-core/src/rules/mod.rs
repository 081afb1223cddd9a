//! Quick-pick digit rules.
//!
//! Every rule resolves to a fixed list of two-digit numbers. Break groups and
//! size classes are hand-curated tables and are not derived from their labels.

pub mod expander;

pub use expander::{add_digits, reverse_digits};

use crate::error::TwoDError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Break groups 1..=10, indexed by `id - 1`.
const BREAK_GROUPS: [(&str, &[&str]); 10] = [
    ("0/10", &["01", "10", "29", "38", "47", "56"]),
    ("1/11", &["11", "20", "39", "48", "57", "66"]),
    ("2/12", &["21", "30", "49", "58", "67"]),
    ("3/13", &["31", "40", "22", "59", "68", "77"]),
    ("4/14", &["41", "50", "69", "78", "32"]),
    ("5/15", &["51", "60", "79", "33", "88"]),
    ("6/16", &["61", "70", "89", "43", "98"]),
    ("7/17", &["71", "80", "99", "53", "44"]),
    ("8/18", &["81", "90", "18", "27", "36"]),
    ("9/19", &["91", "28", "37", "46", "55"]),
];

/// Size and parity classes 1..=8, indexed by `id - 1`.
const SIZE_CLASSES: [(&str, &[&str]); 8] = [
    (
        "ညီအစ်ကို",
        &["01", "12", "23", "34", "45", "56", "67", "78", "89", "90"],
    ),
    (
        "ကြီး",
        &[
            "55", "56", "57", "58", "59", "65", "66", "67", "68", "69", "75", "76", "77", "78",
            "79", "85", "86", "87", "88", "89", "95", "96", "97", "98", "99",
        ],
    ),
    (
        "ငယ်",
        &[
            "00", "01", "02", "03", "04", "10", "11", "12", "13", "14", "20", "21", "22", "23",
            "24", "30", "31", "32", "33", "34", "40", "41", "42", "43", "44",
        ],
    ),
    (
        "မ",
        &[
            "11", "13", "15", "17", "19", "31", "33", "35", "37", "39", "51", "53", "55", "57",
            "59", "71", "73", "75", "77", "79", "91", "93", "95", "97", "99",
        ],
    ),
    (
        "စုံ",
        &[
            "00", "02", "04", "06", "08", "20", "22", "24", "26", "28", "40", "42", "44", "46",
            "48", "60", "62", "64", "66", "68", "80", "82", "84", "86", "88",
        ],
    ),
    (
        "စုံစုံ",
        &[
            "01", "12", "23", "34", "45", "56", "67", "78", "89", "90", "10", "21", "32", "43",
            "54", "65", "76", "87", "98", "09", "30", "41", "52", "63", "74",
        ],
    ),
    (
        "စုံမ",
        &["00", "11", "22", "33", "44", "55", "66", "77", "88", "99"],
    ),
    (
        "အပူး",
        &["00", "11", "22", "33", "44", "55", "66", "77", "88", "99"],
    ),
];

pub const TWENTY_RANGES: [&str; 5] = ["00-19", "20-39", "40-59", "60-79", "80-99"];

const POWER_NUMBERS: [&str; 10] = ["05", "50", "16", "61", "27", "72", "38", "83", "49", "94"];

/// A quick-pick selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuickPick {
    /// Break group by id (1-10).
    Break(u8),
    /// Size/parity class by id (1-8).
    Size(u8),
    /// Twenty-number range by label, e.g. "20-39".
    Twenty(String),
    /// Every number starting with the digit.
    Head(u8),
    /// Every number ending with the digit.
    Tail(u8),
    /// Every number containing the digit.
    Pathee(u8),
    Power,
}

impl QuickPick {
    /// Literal numbers this rule stands for. Unknown ids and labels give an empty list.
    pub fn expand(&self) -> Vec<String> {
        match self {
            QuickPick::Break(id) => lookup(&BREAK_GROUPS, *id),
            QuickPick::Size(id) => lookup(&SIZE_CLASSES, *id),
            QuickPick::Twenty(label) => expand_twenty(label),
            QuickPick::Head(d) => by_digit(*d, |n, d| n / 10 == d),
            QuickPick::Tail(d) => by_digit(*d, |n, d| n % 10 == d),
            QuickPick::Pathee(d) => by_digit(*d, |n, d| n / 10 == d || n % 10 == d),
            QuickPick::Power => to_owned(POWER_NUMBERS.as_slice()),
        }
    }

    /// Display label of the rule as shown on the selection screen.
    pub fn label(&self) -> Option<String> {
        match self {
            QuickPick::Break(id) => label_of(&BREAK_GROUPS, *id),
            QuickPick::Size(id) => label_of(&SIZE_CLASSES, *id),
            QuickPick::Twenty(label) => TWENTY_RANGES
                .contains(&label.as_str())
                .then(|| label.clone()),
            QuickPick::Head(d) if *d <= 9 => Some(format!("ထိပ် {}", d)),
            QuickPick::Tail(d) if *d <= 9 => Some(format!("နောက် {}", d)),
            QuickPick::Pathee(d) if *d <= 9 => Some(format!("ပတ်သီး {}", d)),
            QuickPick::Power => Some("ပါဝါ".to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for QuickPick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuickPick::Break(id) => write!(f, "break {}", id),
            QuickPick::Size(id) => write!(f, "size {}", id),
            QuickPick::Twenty(label) => write!(f, "range {}", label),
            QuickPick::Head(d) => write!(f, "head {}", d),
            QuickPick::Tail(d) => write!(f, "tail {}", d),
            QuickPick::Pathee(d) => write!(f, "pathee {}", d),
            QuickPick::Power => write!(f, "power"),
        }
    }
}

/// Parses `kind id`, or `kind:id`, in the same words as `Display`.
impl FromStr for QuickPick {
    type Err = TwoDError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (kind, arg) = s
            .split_once(|c: char| c == ':' || c.is_whitespace())
            .map(|(k, a)| (k, a.trim()))
            .unwrap_or((s, ""));

        let id = || {
            arg.parse::<u8>()
                .map_err(|_| TwoDError::validation(format!("'{}' needs a numeric id", s)))
        };

        match kind.to_ascii_lowercase().as_str() {
            "break" => Ok(QuickPick::Break(id()?)),
            "size" => Ok(QuickPick::Size(id()?)),
            "range" | "twenty" => Ok(QuickPick::Twenty(arg.to_string())),
            "head" => Ok(QuickPick::Head(id()?)),
            "tail" => Ok(QuickPick::Tail(id()?)),
            "pathee" => Ok(QuickPick::Pathee(id()?)),
            "power" => Ok(QuickPick::Power),
            _ => Err(TwoDError::validation(format!("Unknown rule '{}'", s))),
        }
    }
}

/// One catalog row, for listing.
#[derive(Debug, Clone)]
pub struct RuleGroup {
    pub rule: QuickPick,
    pub label: String,
    pub numbers: Vec<String>,
}

/// All table-driven rules: break groups, size classes and twenty ranges.
pub fn catalog() -> Vec<RuleGroup> {
    let breaks = (1..=BREAK_GROUPS.len() as u8).map(QuickPick::Break);
    let sizes = (1..=SIZE_CLASSES.len() as u8).map(QuickPick::Size);
    let ranges = TWENTY_RANGES
        .iter()
        .map(|label| QuickPick::Twenty(label.to_string()));

    breaks
        .chain(sizes)
        .chain(ranges)
        .filter_map(|rule| {
            let label = rule.label()?;
            let numbers = rule.expand();
            Some(RuleGroup {
                rule,
                label,
                numbers,
            })
        })
        .collect()
}

fn lookup(table: &[(&str, &[&str])], id: u8) -> Vec<String> {
    table
        .get((id as usize).wrapping_sub(1))
        .map(|(_, digits)| to_owned(digits))
        .unwrap_or_default()
}

fn label_of(table: &[(&str, &[&str])], id: u8) -> Option<String> {
    table
        .get((id as usize).wrapping_sub(1))
        .map(|(label, _)| label.to_string())
}

fn to_owned(digits: &[&str]) -> Vec<String> {
    digits.iter().map(|d| d.to_string()).collect()
}

fn expand_twenty(label: &str) -> Vec<String> {
    if !TWENTY_RANGES.contains(&label) {
        return Vec::new();
    }

    let Some((start, end)) = label.split_once('-') else {
        return Vec::new();
    };

    match (start.parse::<u8>(), end.parse::<u8>()) {
        (Ok(start), Ok(end)) => (start..=end).map(|n| format!("{:02}", n)).collect(),
        _ => Vec::new(),
    }
}

fn by_digit(digit: u8, keep: impl Fn(u8, u8) -> bool) -> Vec<String> {
    if digit > 9 {
        return Vec::new();
    }

    (0..100u8)
        .filter(|n| keep(*n, digit))
        .map(|n| format!("{:02}", n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_break_groups_are_verbatim() {
        assert_eq!(
            QuickPick::Break(1).expand(),
            vec!["01", "10", "29", "38", "47", "56"]
        );
        assert_eq!(
            QuickPick::Break(4).expand(),
            vec!["31", "40", "22", "59", "68", "77"]
        );
        assert_eq!(
            QuickPick::Break(10).expand(),
            vec!["91", "28", "37", "46", "55"]
        );
        assert_eq!(QuickPick::Break(3).label().as_deref(), Some("2/12"));
    }

    #[test]
    fn test_size_classes() {
        assert_eq!(QuickPick::Size(2).expand().len(), 25);
        assert_eq!(QuickPick::Size(6).expand().len(), 25);
        assert_eq!(QuickPick::Size(7).expand(), QuickPick::Size(8).expand());
        assert_eq!(QuickPick::Size(1).expand()[9], "90");
        assert_eq!(QuickPick::Size(8).label().as_deref(), Some("အပူး"));
    }

    #[test]
    fn test_unknown_ids_expand_to_nothing() {
        assert!(QuickPick::Break(0).expand().is_empty());
        assert!(QuickPick::Break(11).expand().is_empty());
        assert!(QuickPick::Size(9).expand().is_empty());
        assert!(QuickPick::Twenty("10-29".to_string()).expand().is_empty());
        assert!(QuickPick::Twenty("garbage".to_string()).expand().is_empty());
        assert!(QuickPick::Head(10).expand().is_empty());
        assert!(QuickPick::Break(0).label().is_none());
    }

    #[test]
    fn test_twenty_range() {
        let numbers = QuickPick::Twenty("20-39".to_string()).expand();
        assert_eq!(numbers.len(), 20);
        assert_eq!(numbers.first().map(String::as_str), Some("20"));
        assert_eq!(numbers.last().map(String::as_str), Some("39"));

        let low = QuickPick::Twenty("00-19".to_string()).expand();
        assert_eq!(low[0], "00");
        assert_eq!(low[19], "19");
    }

    #[test]
    fn test_digit_selectors() {
        let head = QuickPick::Head(3).expand();
        assert_eq!(head.len(), 10);
        assert!(head.iter().all(|n| n.starts_with('3')));

        let tail = QuickPick::Tail(0).expand();
        assert_eq!(tail[0], "00");
        assert_eq!(tail[9], "90");

        let pathee = QuickPick::Pathee(7).expand();
        assert_eq!(pathee.len(), 19);
        assert!(pathee.contains(&"77".to_string()));
        assert!(pathee.iter().all(|n| n.contains('7')));

        assert_eq!(QuickPick::Power.expand().len(), 10);
    }

    #[test]
    fn test_parse_matches_display() {
        for rule in [
            QuickPick::Break(3),
            QuickPick::Size(8),
            QuickPick::Twenty("40-59".to_string()),
            QuickPick::Head(0),
            QuickPick::Pathee(9),
            QuickPick::Power,
        ] {
            assert_eq!(rule.to_string().parse::<QuickPick>().unwrap(), rule);
        }

        assert_eq!("break:1".parse::<QuickPick>().unwrap(), QuickPick::Break(1));
        assert!("break x".parse::<QuickPick>().is_err());
        assert!("lucky 7".parse::<QuickPick>().is_err());
    }

    #[test]
    fn test_catalog_lists_every_table_rule() {
        let rules = catalog();
        assert_eq!(rules.len(), 10 + 8 + 5);
        assert!(rules.iter().all(|group| !group.numbers.is_empty()));
    }
}
