// Check the engine and codec against the RFC 1321 test suite.
use crate::{sig_from_string, sig_to_string, Md5};

use tracing::{info, warn};

/// Input strings and their expected signatures. The last three sit exactly on
/// the padding boundaries.
pub const RFC1321_VECTORS: [(&str, &str); 10] = [
    ("", "d41d8cd98f00b204e9800998ecf8427e"),
    ("a", "0cc175b9c0f1b6a831c399e269772661"),
    ("abc", "900150983cd24fb0d6963f7d28e17f72"),
    ("message digest", "f96b697d7cb7938d525a2f31aaf161d0"),
    ("abcdefghijklmnopqrstuvwxyz", "c3fcd3d76192e4007dfb496cca67e13b"),
    (
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
        "d174ab98d277d9f5a5611c2c9f419d9f",
    ),
    (
        "12345678901234567890123456789012345678901234567890123456789012345678901234567890",
        "57edf4a22be3c955ac49da2e2107b67a",
    ),
    (
        "This string is precisely 56 characters long for a reason",
        "93d268e9bef6608ff1a6a96adbeee106",
    ),
    (
        "This string is exactly 64 characters long for a very good reason",
        "655c37c2c8451a60306d09f2971e49ff",
    ),
    (
        "This string is also a specific length.  It is exactly 128 characters long for a very good reason as well. We are testing bounds.",
        "2ac62baa5be7fa36587c55691c026b35",
    ),
];

/// Result of checking a single vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorOutcome {
    pub input: &'static str,
    pub expected: &'static str,
    pub actual: String,
    pub hash_ok: bool,
    pub conversion_ok: bool,
}

impl VectorOutcome {
    pub fn passed(&self) -> bool {
        self.hash_ok && self.conversion_ok
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelfTestReport {
    pub total: usize,
    pub passed: usize,
    pub hashing_passed: usize,
    pub conversion_passed: usize,
    pub outcomes: Vec<VectorOutcome>,
}

impl SelfTestReport {
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    pub fn failures(&self) -> impl Iterator<Item = &VectorOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.passed())
    }
}

pub fn run_self_test() -> SelfTestReport {
    run_vectors(&RFC1321_VECTORS)
}

fn run_vectors(vectors: &[(&'static str, &'static str)]) -> SelfTestReport {
    let mut report = SelfTestReport {
        total: vectors.len(),
        ..Default::default()
    };

    for &(input, expected) in vectors {
        let digest = Md5::digest_message(input.as_bytes());
        let actual = sig_to_string(&digest);

        let hash_ok = actual == expected;
        let conversion_ok = sig_from_string(&actual).is_ok_and(|decoded| decoded == digest);

        if hash_ok {
            report.hashing_passed += 1;
        }
        if conversion_ok {
            report.conversion_passed += 1;
        }
        let outcome = VectorOutcome {
            input,
            expected,
            actual,
            hash_ok,
            conversion_ok,
        };
        if outcome.passed() {
            report.passed += 1;
            info!(input, signature = %outcome.actual, "self-test vector passed");
        } else {
            warn!(
                input,
                expected,
                actual = %outcome.actual,
                hash_ok,
                conversion_ok,
                "self-test vector failed"
            );
        }
        report.outcomes.push(outcome);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc1321_vectors_all_pass() {
        let report = run_self_test();

        assert!(
            report.all_passed(),
            "{:?}",
            report.failures().collect::<Vec<_>>()
        );
        assert_eq!(report.outcomes.len(), RFC1321_VECTORS.len());
        assert_eq!(report.total, RFC1321_VECTORS.len());
        assert_eq!(report.hashing_passed, report.total);
        assert_eq!(report.conversion_passed, report.total);
    }

    #[test]
    fn boundary_vectors_have_expected_lengths() {
        let lengths: Vec<usize> = RFC1321_VECTORS[7..].iter().map(|(s, _)| s.len()).collect();

        assert_eq!(lengths, [56, 64, 128]);
    }

    #[test]
    fn wrong_expectation_is_reported_as_failure() {
        let vectors = [
            ("abc", "900150983cd24fb0d6963f7d28e17f72"),
            ("abc", "00000000000000000000000000000000"),
        ];

        let report = run_vectors(&vectors);

        assert!(!report.all_passed());
        assert_eq!(report.passed, 1);
        assert_eq!(report.hashing_passed, 1);
        assert_eq!(report.conversion_passed, 2);
        assert_eq!(
            report.failures().cloned().collect::<Vec<_>>(),
            [VectorOutcome {
                input: "abc",
                expected: "00000000000000000000000000000000",
                actual: "900150983cd24fb0d6963f7d28e17f72".to_string(),
                hash_ok: false,
                conversion_ok: true,
            }]
        );
    }
}
