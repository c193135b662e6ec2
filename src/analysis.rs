//! Scoring passwords against a configurable set of strength criteria.

use serde::Serialize;
use tracing::debug;

use crate::charset::SYMBOLS;

/// Which rules a password has to satisfy. The length rule always applies; each `require_*` flag
/// switches on one character-class rule.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AnalysisCriteria {
    pub min_length: usize,
    pub require_symbols: bool,
    pub require_digits: bool,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
}

impl Default for AnalysisCriteria {
    fn default() -> AnalysisCriteria {
        AnalysisCriteria {
            min_length: 8,
            require_symbols: false,
            require_digits: true,
            require_uppercase: true,
            require_lowercase: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    Length,
    Symbols,
    Digits,
    Uppercase,
    Lowercase,
}

impl Criterion {
    pub fn name(self) -> &'static str {
        match self {
            Criterion::Length => "length",
            Criterion::Symbols => "symbols",
            Criterion::Digits => "digits",
            Criterion::Uppercase => "uppercase",
            Criterion::Lowercase => "lowercase",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Criterion::Length => "length",
            Criterion::Symbols => "special characters",
            Criterion::Digits => "digits",
            Criterion::Uppercase => "uppercase letters",
            Criterion::Lowercase => "lowercase letters",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct CheckOutcome {
    pub criterion: Criterion,
    pub satisfied: bool,
}

impl CheckOutcome {
    /// A short human-readable line for this check, e.g. "Missing digits".
    pub fn describe(&self, length: usize, criteria: &AnalysisCriteria) -> String {
        match (self.criterion, self.satisfied) {
            (Criterion::Length, true) => format!("Length: {} characters", length),
            (Criterion::Length, false) => format!(
                "Too short ({} < {} characters)",
                length, criteria.min_length
            ),
            (criterion, true) => format!("Contains {}", criterion.noun()),
            (criterion, false) => format!("Missing {}", criterion.noun()),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Only the checks that were switched on, in a fixed order: length, symbols, digits,
    /// uppercase, lowercase.
    pub checks: Vec<CheckOutcome>,
    pub passed: bool,
    /// Length of the password in bytes.
    pub length: usize,
}

impl AnalysisResult {
    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.checks.iter().filter(|check| !check.satisfied)
    }
}

pub fn analyze(password: &str, criteria: &AnalysisCriteria) -> AnalysisResult {
    let length = password.len();
    let mut checks = vec![CheckOutcome {
        criterion: Criterion::Length,
        satisfied: length >= criteria.min_length,
    }];

    let class_rules: [(bool, Criterion, fn(char) -> bool); 4] = [
        (criteria.require_symbols, Criterion::Symbols, is_symbol),
        (criteria.require_digits, Criterion::Digits, |ch| {
            ch.is_ascii_digit()
        }),
        (criteria.require_uppercase, Criterion::Uppercase, |ch| {
            ch.is_ascii_uppercase()
        }),
        (criteria.require_lowercase, Criterion::Lowercase, |ch| {
            ch.is_ascii_lowercase()
        }),
    ];
    for (enabled, criterion, matches) in class_rules {
        if enabled {
            checks.push(CheckOutcome {
                criterion,
                satisfied: password.chars().any(matches),
            });
        }
    }

    let passed = checks.iter().all(|check| check.satisfied);
    AnalysisResult {
        checks,
        passed,
        length,
    }
}

fn is_symbol(ch: char) -> bool {
    SYMBOLS.contains(ch)
}

/// Qualitative verdict on a batch, derived from the pass count and total alone.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Every password passed.
    Excellent,
    /// More than half passed.
    Good,
    Warning,
}

impl Tier {
    pub fn from_counts(passed: usize, total: usize) -> Tier {
        if passed == total {
            Tier::Excellent
        } else if passed * 2 > total {
            Tier::Good
        } else {
            Tier::Warning
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BatchReport {
    /// One result per input password, in input order.
    pub results: Vec<AnalysisResult>,
    pub passed: usize,
    pub total: usize,
}

impl BatchReport {
    pub fn tier(&self) -> Tier {
        Tier::from_counts(self.passed, self.total)
    }

    /// The pass ratio as `passed/total`.
    pub fn fraction(&self) -> String {
        format!("{}/{}", self.passed, self.total)
    }
}

pub fn analyze_batch<I, S>(passwords: I, criteria: &AnalysisCriteria) -> BatchReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let results = passwords
        .into_iter()
        .map(|password| analyze(password.as_ref(), criteria))
        .collect::<Vec<_>>();
    let passed = results.iter().filter(|result| result.passed).count();
    let total = results.len();
    debug!(passed, total, "analyzed batch");
    BatchReport {
        results,
        passed,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_rules(min_length: usize) -> AnalysisCriteria {
        AnalysisCriteria {
            min_length,
            require_symbols: true,
            require_digits: true,
            require_uppercase: true,
            require_lowercase: true,
        }
    }

    #[test]
    fn symbol_digit_lowercase_password_passes() {
        let criteria = AnalysisCriteria {
            min_length: 8,
            require_symbols: true,
            require_digits: true,
            require_uppercase: false,
            require_lowercase: true,
        };
        let result = analyze("test@123", &criteria);
        assert!(result.passed);
        assert_eq!(result.length, 8);
        let criteria_seen = result.checks.iter().map(|c| c.criterion).collect::<Vec<_>>();
        assert_eq!(
            criteria_seen,
            [
                Criterion::Length,
                Criterion::Symbols,
                Criterion::Digits,
                Criterion::Lowercase
            ]
        );
    }

    #[test]
    fn short_password_fails_regardless_of_classes() {
        let result = analyze("aB1!", &all_rules(8));
        assert!(!result.passed);
        let failed = result.failed_checks().map(|c| c.criterion).collect::<Vec<_>>();
        assert_eq!(failed, [Criterion::Length]);
    }

    #[test]
    fn empty_password_fails_every_enabled_check() {
        let result = analyze("", &all_rules(1));
        assert!(!result.passed);
        assert_eq!(result.checks.len(), 5);
        assert!(result.checks.iter().all(|c| !c.satisfied));
    }

    #[test]
    fn disabled_rules_are_left_out() {
        let criteria = AnalysisCriteria {
            min_length: 0,
            require_symbols: false,
            require_digits: false,
            require_uppercase: false,
            require_lowercase: false,
        };
        let result = analyze("", &criteria);
        assert!(result.passed);
        assert_eq!(result.checks.len(), 1);
        assert_eq!(result.checks[0].criterion, Criterion::Length);
    }

    #[test]
    fn character_classes() {
        let cases = [
            ("test@123", Criterion::Symbols, true),
            ("test123", Criterion::Symbols, false),
            ("test!@#$", Criterion::Symbols, true),
            ("test123", Criterion::Digits, true),
            ("testABC", Criterion::Digits, false),
            ("Test123", Criterion::Uppercase, true),
            ("test123", Criterion::Uppercase, false),
            ("Test123", Criterion::Lowercase, true),
            ("TEST123", Criterion::Lowercase, false),
        ];
        for (password, criterion, expected) in cases {
            let result = analyze(password, &all_rules(0));
            let check = result
                .checks
                .iter()
                .find(|c| c.criterion == criterion)
                .unwrap();
            assert_eq!(check.satisfied, expected, "{password:?} / {criterion:?}");
        }
    }

    #[test]
    fn classification_is_ascii_only() {
        let result = analyze("ÄÖÜ§éß", &all_rules(0));
        assert!(result.checks[1..].iter().all(|c| !c.satisfied));
        assert_eq!(result.length, "ÄÖÜ§éß".len());
    }

    #[test]
    fn descriptions() {
        let criteria = AnalysisCriteria::default();
        let result = analyze("abc", &criteria);
        let lines = result
            .checks
            .iter()
            .map(|c| c.describe(result.length, &criteria))
            .collect::<Vec<_>>();
        assert_eq!(
            lines,
            [
                "Too short (3 < 8 characters)",
                "Missing digits",
                "Missing uppercase letters",
                "Contains lowercase letters",
            ]
        );
    }

    #[test]
    fn batch_keeps_order_and_duplicates() {
        let report = analyze_batch(
            ["Password1", "short", "Password1", "Another22"],
            &AnalysisCriteria::default(),
        );
        assert_eq!(report.total, 4);
        assert_eq!(report.passed, 3);
        assert_eq!(report.fraction(), "3/4");
        assert_eq!(report.tier(), Tier::Good);
        let verdicts = report.results.iter().map(|r| r.passed).collect::<Vec<_>>();
        assert_eq!(verdicts, [true, false, true, true]);
    }

    #[test]
    fn tiers() {
        assert_eq!(Tier::from_counts(4, 4), Tier::Excellent);
        assert_eq!(Tier::from_counts(3, 4), Tier::Good);
        assert_eq!(Tier::from_counts(2, 4), Tier::Warning);
        assert_eq!(Tier::from_counts(2, 3), Tier::Good);
        assert_eq!(Tier::from_counts(1, 3), Tier::Warning);
        assert_eq!(Tier::from_counts(0, 1), Tier::Warning);
        assert_eq!(Tier::from_counts(0, 0), Tier::Excellent);
    }
}
