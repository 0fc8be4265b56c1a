//! Regression test parameters and operations

use crate::error::TestError;
use voxbridge_core::Element;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Collect failures and report them at cleanup (default)
    #[default]
    Compare,
    /// Also print every comparison as it runs
    Display,
}

impl RegTestMode {
    /// Parse mode from environment variable or string
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    /// Parse a mode name; anything unrecognised is `Compare`.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "resolve")
    pub test_name: String,
    /// Current test index (incremented before each test)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "resolve")
    ///
    /// # Returns
    ///
    /// A new `RegParams` instance configured based on the `REGTEST_MODE`
    /// environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn record(&mut self, err: TestError) {
        let msg = format!("Failure in {}_reg: {}", self.test_name, err);
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();
        if self.display() {
            eprintln!(
                "  [{:02}] expected = {}, actual = {}",
                self.index, expected, actual
            );
        }

        if diff > delta || diff.is_nan() {
            self.record(TestError::ValueMismatch {
                index: self.index,
                expected,
                actual,
                delta,
            });
            false
        } else {
            true
        }
    }

    /// Compare two element buffers for exact equality
    ///
    /// # Returns
    ///
    /// `true` if the buffers have the same length and identical elements.
    pub fn compare_buffers<T: Element>(&mut self, expected: &[T], actual: &[T]) -> bool {
        self.index += 1;
        if self.display() {
            eprintln!(
                "  [{:02}] comparing {} {} element(s)",
                self.index,
                expected.len(),
                T::KIND
            );
        }

        if expected.len() != actual.len() {
            self.record(TestError::BufferMismatch {
                index: self.index,
                detail: format!("length {} vs {}", expected.len(), actual.len()),
            });
            return false;
        }

        if let Some(pos) = expected.iter().zip(actual).position(|(a, b)| a != b) {
            self.record(TestError::BufferMismatch {
                index: self.index,
                detail: format!(
                    "first difference at element {}: {:?} vs {:?}",
                    pos, expected[pos], actual[pos]
                ),
            });
            return false;
        }

        true
    }

    /// Record a boolean condition
    ///
    /// # Returns
    ///
    /// `condition`, after recording a failure with `what` if it is false.
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if self.display() {
            eprintln!("  [{:02}] {}: {}", self.index, what, condition);
        }
        if !condition {
            let msg = format!(
                "Failure in {}_reg: check {} failed: {}",
                self.test_name, self.index, what
            );
            eprintln!("{}", msg);
            self.failures.push(msg);
            self.success = false;
        }
        condition
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
