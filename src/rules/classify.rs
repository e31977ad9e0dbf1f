//! Status classification — maps a (test name, result string) pair to a
//! normalized pass/fail status using per-test-family policies.
//!
//! The family table is an ordered list of (substring matcher, policy)
//! pairs evaluated top to bottom; the first matching family wins and
//! unknown test names fall through to the normal-or-better policy.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::enums::ClearanceStatus;

/// Sentinel grade when a result that should carry a numeric grade has
/// none. 99 exceeds every passing threshold, so a malformed result
/// fails rather than silently passing.
const MISSING_GRADE: i64 = 99;

/// How a family's result strings are evaluated.
#[derive(Debug, Clone, Copy)]
enum Policy {
    /// Pass iff the result mentions a clear/normal outcome.
    NormalOrBetter,
    /// Pass iff the first integer in the result is <= the threshold.
    GradedMax(i64),
    /// OFA hip grades: pass iff excellent/good/fair appears.
    OfaFairOrBetter,
    /// DNA results: carriers pass, only "affected" fails.
    CarriersAcceptable,
}

/// Ordered family table; substring match on the lowercased test name,
/// first match wins.
const FAMILY_RULES: &[(&str, Policy)] = &[
    ("cardiac evaluation", Policy::NormalOrBetter),
    ("patella evaluation", Policy::GradedMax(1)),
    ("hip evaluation", Policy::OfaFairOrBetter),
    ("elbow evaluation", Policy::GradedMax(1)),
    ("boas assessment", Policy::GradedMax(2)),
    ("eye examination", Policy::NormalOrBetter),
    ("dna test", Policy::CarriersAcceptable),
];

const CLEAR_KEYWORDS: &[&str] = &["normal", "clear", "negative", "pass"];
const OFA_PASSING_GRADES: &[&str] = &["excellent", "good", "fair"];

/// Classify a test result into a normalized status.
///
/// Pure function of its inputs; all matching is case-insensitive.
pub fn classify(test: &str, result: &str) -> ClearanceStatus {
    let test = test.to_lowercase();
    let result = result.to_lowercase();

    let policy = FAMILY_RULES
        .iter()
        .find(|(family, _)| test.contains(family))
        .map(|(_, policy)| *policy)
        .unwrap_or(Policy::NormalOrBetter);

    let passed = match policy {
        Policy::NormalOrBetter => CLEAR_KEYWORDS.iter().any(|k| result.contains(k)),
        Policy::GradedMax(max) => first_integer(&result).unwrap_or(MISSING_GRADE) <= max,
        Policy::OfaFairOrBetter => OFA_PASSING_GRADES.iter().any(|g| result.contains(g)),
        Policy::CarriersAcceptable => !result.contains("affected"),
    };

    if passed {
        ClearanceStatus::Passed
    } else {
        ClearanceStatus::Failed
    }
}

/// First integer substring in `s`, if any. An unparseable run of digits
/// (overflow) also yields `None`, which the caller treats as a missing
/// grade.
fn first_integer(s: &str) -> Option<i64> {
    static INT_RE: OnceLock<Regex> = OnceLock::new();
    let re = INT_RE.get_or_init(|| Regex::new(r"\d+").expect("literal regex compiles"));
    re.find(s).and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ClearanceStatus::{Failed, Passed};

    #[test]
    fn hip_ofa_grades() {
        assert_eq!(classify("Hip Evaluation", "OFA Good"), Passed);
        assert_eq!(classify("Hip Evaluation", "OFA Excellent"), Passed);
        assert_eq!(classify("Hip Evaluation", "OFA Fair"), Passed);
        assert_eq!(classify("Hip Evaluation", "OFA Poor"), Failed);
        assert_eq!(classify("Hip Evaluation", "Borderline"), Failed);
    }

    #[test]
    fn patella_grade_threshold() {
        assert_eq!(classify("Patella Evaluation", "Grade 0"), Passed);
        assert_eq!(classify("Patella Evaluation", "Grade 1"), Passed);
        assert_eq!(classify("Patella Evaluation", "Grade 2"), Failed);
    }

    #[test]
    fn missing_grade_fails_safe() {
        // No digits in the result → sentinel 99 → fail, never a false pass
        assert_eq!(classify("Patella Evaluation", "Unknown"), Failed);
        assert_eq!(classify("Elbow Evaluation", ""), Failed);
        assert_eq!(classify("BOAS Assessment", "pending review"), Failed);
    }

    #[test]
    fn elbow_grade_threshold() {
        assert_eq!(classify("Elbow Evaluation", "Grade 1"), Passed);
        assert_eq!(classify("Elbow Evaluation", "Grade 2"), Failed);
    }

    #[test]
    fn boas_score_threshold() {
        assert_eq!(classify("BOAS Assessment", "Score 0"), Passed);
        assert_eq!(classify("BOAS Assessment", "Score 2"), Passed);
        assert_eq!(classify("BOAS Assessment", "Score 3"), Failed);
    }

    #[test]
    fn dna_carriers_are_acceptable() {
        assert_eq!(classify("DNA Test", "Clear"), Passed);
        assert_eq!(classify("DNA Test", "Carrier"), Passed);
        assert_eq!(classify("DNA Test", "Affected"), Failed);
    }

    #[test]
    fn cardiac_and_eye_require_clear_result() {
        assert_eq!(classify("Cardiac Evaluation", "Normal"), Passed);
        assert_eq!(classify("Cardiac Evaluation", "Grade II murmur"), Failed);
        assert_eq!(classify("Eye Examination", "Clear"), Passed);
        assert_eq!(classify("Eye Examination", "Distichiasis"), Failed);
    }

    #[test]
    fn unknown_test_uses_default_policy() {
        assert_eq!(classify("Thyroid Panel", "Normal"), Passed);
        assert_eq!(classify("Thyroid Panel", "Elevated TSH"), Failed);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("HIP EVALUATION", "ofa GOOD"), Passed);
        assert_eq!(classify("dna test", "AFFECTED"), Failed);
    }

    #[test]
    fn classification_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(classify("Hip Evaluation", "OFA Good"), Passed);
        }
    }

    #[test]
    fn huge_digit_run_fails_safe() {
        // Overflows i64 → treated as missing grade → fail
        assert_eq!(
            classify("Patella Evaluation", "Grade 99999999999999999999999"),
            Failed
        );
    }
}
