//! Test macros for common testing patterns

/// Assert that a result is an error carrying the given relay error code.
///
/// Works with any error type exposing `code() -> &str`.
#[macro_export]
macro_rules! assert_error_code {
    ($result:expr, $code:expr) => {{
        match $result {
            Ok(ref value) => panic!("Expected error {}, but got Ok({:?})", $code, value),
            Err(ref e) => {
                assert_eq!(e.code(), $code, "Unexpected error code for '{}'", e);
            }
        }
    }};
}

/// Macro to assert an error contains a specific substring
#[macro_export]
macro_rules! assert_error_contains {
    ($result:expr, $expected:expr) => {{
        match $result {
            Ok(_) => panic!("Expected error containing '{}', but got Ok", $expected),
            Err(e) => {
                let error_str = format!("{}", e);
                if !error_str.contains($expected) {
                    panic!("Expected error to contain '{}', but got '{}'", $expected, error_str);
                }
            }
        }
    }};
}
