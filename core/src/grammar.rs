//! Line classifier: the bet grammar.
//!
//! Each cleaned, digit-bearing line is tried against an ordered list of
//! independent matchers (first match wins):
//!   1. parlet     `38x70-15`
//!   2. terminal   `terminal 7-10`, `ter 7-10-20`, `07-97-10`
//!   3. pairs      `parejas-10`, `00 al 99-10`, `00-99-10`
//!   4. decade     `los 70-10`, `70-79-10`, `15 al 25-5`, `10 a todos los 40`
//!   5. generic    `50-10`, `150-10`, `50-10-20-30`, `12,34-5`
//!
//! A line no matcher accepts degrades to a single `Error` bet; it is
//! never dropped and never aborts extraction. Triplet detection is a
//! single reclassification pass over the matcher output, not a
//! per-family check: any `Fixed` bet whose three stakes are all
//! strictly positive becomes a `Triplet`.
//!
//! Everything here is pure and deterministic. Same input, same output.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Sentinel number carried by `Error` bets.
pub const ERROR_NUMBER: &str = "ND";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetCategory {
    Fixed,
    Hundred,
    Parlet,
    Triplet,
    Error,
}

/// The atomic unit produced by classification.
///
/// `number` is canonical: two-digit categories zero-padded to width 2,
/// `Hundred` to width 3, `Parlet` as `NNxNN` with the smaller member
/// first. `runner1`/`runner2` are secondary stakes tied to the same
/// number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    pub category: BetCategory,
    pub number: String,
    pub amount: u64,
    pub runner1: u64,
    pub runner2: u64,
    pub source_line: String,
}

impl Bet {
    fn fixed(number: String, amounts: &Amounts, line: &str) -> Self {
        Bet {
            category: BetCategory::Fixed,
            number,
            amount: amounts.primary,
            runner1: amounts.runner1,
            runner2: amounts.runner2,
            source_line: line.to_string(),
        }
    }

    fn error(line: &str) -> Self {
        Bet {
            category: BetCategory::Error,
            number: ERROR_NUMBER.to_string(),
            amount: 0,
            runner1: 0,
            runner2: 0,
            source_line: line.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.category == BetCategory::Error
    }

    /// Total money this bet puts at stake.
    pub fn stake(&self) -> u64 {
        self.amount + self.runner1 + self.runner2
    }
}

/// Result of running the grammar over a cleaned transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extraction {
    /// All bets in line order, `Error` bets included.
    pub bets: Vec<Bet>,
    /// The digit-bearing lines that were classified, in original order.
    /// Persisted alongside the ticket as the audit trace.
    pub final_text: String,
    /// Source lines of the `Error` bets.
    pub unrecognized: Vec<String>,
}

/// 1 to 3 stake amounts trailing a pattern.
struct Amounts {
    primary: u64,
    runner1: u64,
    runner2: u64,
}

// Amount tail shared by every family: 1-3 integers behind - _ = > or space.
const AMOUNT_TAIL: &str = r"[-_=>\s]+(\d+)(?:[-_=>\s]+(\d+))?(?:[-_=>\s]+(\d+))?\s*$";

static RE_PARLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})\s*[x*×]\s*(\d{1,2})[-_=>\s]+(\d+)\s*$").unwrap());

static RE_TERMINAL_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(?:ter(?:minal(?:es)?)?|t)[-_.\s]*(\d){AMOUNT_TAIL}")).unwrap()
});

static RE_TERMINAL_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^0(\d)\s*(?:al|[-_])\s*9(\d){AMOUNT_TAIL}")).unwrap()
});

static RE_PAIRS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?:(?:las\s+)?parejas?|00\s*(?:al|[-_])\s*99){AMOUNT_TAIL}"
    ))
    .unwrap()
});

static RE_DECADE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(?:los|del)\s+(\d)0{AMOUNT_TAIL}")).unwrap()
});

static RE_DECADE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(\d)0\s*(?:al|[-_])\s*(\d)9{AMOUNT_TAIL}")).unwrap()
});

static RE_NUMERIC_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(\d{{1,2}})\s+al\s+(\d{{1,2}}){AMOUNT_TAIL}")).unwrap()
});

static RE_DECADE_INVERTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s*(?:pesos\s+)?a\s+todos\s+los\s+(\d)0\s*$").unwrap()
});

static RE_GENERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^t?\s*(\d{{1,3}})(?:\s*[,.]\s*(\d{{1,3}}))?(?:\s*[,.]\s*(\d{{1,3}}))?{AMOUNT_TAIL}"
    ))
    .unwrap()
});

/// Run the grammar over cleaned text. Lines with no digit are filtered
/// out entirely; every surviving line yields at least one bet.
pub fn extract_bets(clean: &str) -> Extraction {
    let mut bets = Vec::new();
    let mut kept = Vec::new();
    let mut unrecognized = Vec::new();

    for line in clean.lines() {
        let line = line.trim();
        if line.is_empty() || !line.bytes().any(|b| b.is_ascii_digit()) {
            continue;
        }
        kept.push(line);

        let lowered = line.to_lowercase();
        match classify_line(&lowered, line) {
            Some(line_bets) => bets.extend(line_bets),
            None => {
                log::debug!("unrecognized line: {line}");
                unrecognized.push(line.to_string());
                bets.push(Bet::error(line));
            }
        }
    }

    reclassify_triplets(&mut bets);

    Extraction {
        bets,
        final_text: kept.join("\n"),
        unrecognized,
    }
}

/// Try each family in priority order. `None` means no family matched.
fn classify_line(lowered: &str, original: &str) -> Option<Vec<Bet>> {
    match_parlet(lowered, original)
        .or_else(|| match_terminal(lowered, original))
        .or_else(|| match_pairs(lowered, original))
        .or_else(|| match_decade(lowered, original))
        .or_else(|| match_generic(lowered, original))
}

/// Heuristic triplet rule, applied uniformly after all families: a
/// two-digit bet carrying three strictly positive stakes is a triplet
/// wager, whatever phrasing produced it.
fn reclassify_triplets(bets: &mut [Bet]) {
    for bet in bets.iter_mut() {
        if bet.category == BetCategory::Fixed
            && bet.amount > 0
            && bet.runner1 > 0
            && bet.runner2 > 0
        {
            bet.category = BetCategory::Triplet;
        }
    }
}

// ── Family 1: parlet ───────────────────────────────────────────────

fn match_parlet(lowered: &str, original: &str) -> Option<Vec<Bet>> {
    let caps = RE_PARLET.captures(lowered)?;
    let a = pad2(caps.get(1)?.as_str());
    let b = pad2(caps.get(2)?.as_str());
    let amount: u64 = caps.get(3)?.as_str().parse().ok()?;

    // Canonical pair order: smaller member first, whatever the input order.
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

    Some(vec![Bet {
        category: BetCategory::Parlet,
        number: format!("{lo}x{hi}"),
        amount,
        runner1: 0,
        runner2: 0,
        source_line: original.to_string(),
    }])
}

// ── Family 2: terminal ─────────────────────────────────────────────

fn match_terminal(lowered: &str, original: &str) -> Option<Vec<Bet>> {
    let (digit, amounts) = if let Some(caps) = RE_TERMINAL_WORD.captures(lowered) {
        let digit = caps.get(1)?.as_str().parse::<u32>().ok()?;
        (digit, parse_amounts(&caps, 2)?)
    } else if let Some(caps) = RE_TERMINAL_RANGE.captures(lowered) {
        // `07-97-10`: both bounds must share the terminal digit.
        let lo = caps.get(1)?.as_str();
        let hi = caps.get(2)?.as_str();
        if lo != hi {
            return None;
        }
        (lo.parse::<u32>().ok()?, parse_amounts(&caps, 3)?)
    } else {
        return None;
    };

    let bets = (0..10)
        .map(|tens| Bet::fixed(format!("{tens}{digit}"), &amounts, original))
        .collect();
    Some(bets)
}

// ── Family 3: pairs ("parejas") ────────────────────────────────────

fn match_pairs(lowered: &str, original: &str) -> Option<Vec<Bet>> {
    let caps = RE_PAIRS.captures(lowered)?;
    let amounts = parse_amounts(&caps, 1)?;

    let bets = (0..10)
        .map(|d| Bet::fixed(format!("{d}{d}"), &amounts, original))
        .collect();
    Some(bets)
}

// ── Family 4: decade / range ("líneas") ────────────────────────────

fn match_decade(lowered: &str, original: &str) -> Option<Vec<Bet>> {
    if let Some(caps) = RE_DECADE_WORD.captures(lowered) {
        let decade = caps.get(1)?.as_str().parse::<u32>().ok()?;
        let amounts = parse_amounts(&caps, 2)?;
        return Some(expand_range(decade * 10, decade * 10 + 9, &amounts, original));
    }

    if let Some(caps) = RE_DECADE_RANGE.captures(lowered) {
        // `70-79-10`: the regex crate has no backreferences, so the two
        // decade digits are captured separately and compared here.
        let lo = caps.get(1)?.as_str();
        let hi = caps.get(2)?.as_str();
        if lo == hi {
            let decade = lo.parse::<u32>().ok()?;
            let amounts = parse_amounts(&caps, 3)?;
            return Some(expand_range(decade * 10, decade * 10 + 9, &amounts, original));
        }
    }

    if let Some(caps) = RE_NUMERIC_RANGE.captures(lowered) {
        let lo = caps.get(1)?.as_str().parse::<u32>().ok()?;
        let hi = caps.get(2)?.as_str().parse::<u32>().ok()?;
        // Explicit bounded range, capped at 20 numbers wide.
        if lo < hi && hi - lo < 20 {
            let amounts = parse_amounts(&caps, 3)?;
            return Some(expand_range(lo, hi, &amounts, original));
        }
    }

    if let Some(caps) = RE_DECADE_INVERTED.captures(lowered) {
        // Inverted phrasing: `10 a todos los 40` puts the amount first.
        let amount: u64 = caps.get(1)?.as_str().parse().ok()?;
        let decade = caps.get(2)?.as_str().parse::<u32>().ok()?;
        let amounts = Amounts {
            primary: amount,
            runner1: 0,
            runner2: 0,
        };
        return Some(expand_range(decade * 10, decade * 10 + 9, &amounts, original));
    }

    None
}

fn expand_range(lo: u32, hi: u32, amounts: &Amounts, original: &str) -> Vec<Bet> {
    (lo..=hi)
        .map(|n| Bet::fixed(format!("{n:02}"), amounts, original))
        .collect()
}

// ── Family 5: generic fixed / hundred / triplet ────────────────────

fn match_generic(lowered: &str, original: &str) -> Option<Vec<Bet>> {
    let caps = RE_GENERIC.captures(lowered)?;

    let numbers: Vec<&str> = (1..=3)
        .filter_map(|i| caps.get(i).map(|m| m.as_str()))
        .collect();
    let amounts = parse_amounts(&caps, 4)?;

    let mut bets = Vec::with_capacity(numbers.len());
    for raw in numbers {
        if raw.len() > 2 {
            // Three-digit play: a hundred. Runner stakes never attach to
            // hundreds; the drawn runners are two-digit numbers.
            bets.push(Bet {
                category: BetCategory::Hundred,
                number: format!("{:0>3}", raw),
                amount: amounts.primary,
                runner1: 0,
                runner2: 0,
                source_line: original.to_string(),
            });
        } else {
            bets.push(Bet::fixed(pad2(raw), &amounts, original));
        }
    }
    Some(bets)
}

// ── Helpers ────────────────────────────────────────────────────────

/// Read the 1-3 trailing amounts starting at capture group `first`.
fn parse_amounts(caps: &regex::Captures<'_>, first: usize) -> Option<Amounts> {
    let get = |i: usize| -> Option<u64> {
        match caps.get(first + i) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };
    Some(Amounts {
        primary: get(0)?,
        runner1: get(1)?,
        runner2: get(2)?,
    })
}

fn pad2(s: &str) -> String {
    format!("{:0>2}", s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(line: &str) -> Bet {
        let ex = extract_bets(line);
        assert_eq!(ex.bets.len(), 1, "expected one bet for {line:?}");
        ex.bets.into_iter().next().unwrap()
    }

    #[test]
    fn parlet_is_canonically_ordered() {
        assert_eq!(single("70x38-15").number, "38x70");
        assert_eq!(single("38x70-15").number, "38x70");
        assert_eq!(single("5*7-3").number, "05x07");
    }

    #[test]
    fn generic_pads_and_classifies_by_width() {
        let b = single("5-10");
        assert_eq!((b.category, b.number.as_str()), (BetCategory::Fixed, "05"));
        let b = single("150-10");
        assert_eq!((b.category, b.number.as_str()), (BetCategory::Hundred, "150"));
    }

    #[test]
    fn malformed_digit_line_degrades_to_error() {
        let b = single("50-10 y algo mas");
        assert!(b.is_error());
        assert_eq!(b.number, ERROR_NUMBER);
        assert_eq!(b.stake(), 0);
    }

    #[test]
    fn lines_without_digits_are_filtered() {
        let ex = extract_bets("this has no numbers");
        assert!(ex.bets.is_empty());
        assert!(ex.final_text.is_empty());
    }
}
