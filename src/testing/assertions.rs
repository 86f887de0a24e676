//! Custom assertions for normalised options.

use crate::options::{defaults, keys, Options};

/// Assert that options have been normalised.
///
/// # Panics
///
/// Panics with a descriptive message if `normalised` is not `true` or
/// `tests` is not a mapping.
///
/// # Example
///
/// ```rust,ignore
/// normaliser.normalise(&mut options)?;
/// assert_normalised(&options);
/// ```
pub fn assert_normalised(options: &Options) {
    assert!(
        options.is_normalised(),
        "Expected options to be normalised, but `normalised` is {:?}",
        options.get(keys::NORMALISED)
    );
    assert!(
        options.tests().is_some(),
        "Expected `tests` to be a mapping after normalisation, got {:?}",
        options.get(keys::TESTS)
    );
}

/// Assert the number of top-level keys.
///
/// # Panics
///
/// Panics if the expected key count doesn't match, listing the keys.
pub fn assert_key_count(options: &Options, expected: usize) {
    assert_eq!(
        options.len(),
        expected,
        "Expected {} keys, but got {}.\nKeys: {:?}",
        expected,
        options.len(),
        options.keys().collect::<Vec<_>>()
    );
}

/// Assert that every default-backed setting holds its literal default.
///
/// # Panics
///
/// Panics naming the first setting that differs.
pub fn assert_defaults(options: &Options) {
    for (key, value) in defaults() {
        assert_eq!(
            options.get(key),
            Some(&value),
            "Expected `{}` to hold its default",
            key
        );
    }
}

/// Assert the names of the test definitions, in any order.
///
/// # Panics
///
/// Panics if `tests` is not a mapping or holds different names.
pub fn assert_test_names(options: &Options, expected: &[&str]) {
    let tests = options
        .tests()
        .unwrap_or_else(|| panic!("Expected `tests` to be a mapping, got {:?}", options.get(keys::TESTS)));
    let mut actual: Vec<&str> = tests.keys().map(String::as_str).collect();
    let mut expected = expected.to_vec();
    actual.sort_unstable();
    expected.sort_unstable();
    assert_eq!(actual, expected, "Test definition names differ");
}
