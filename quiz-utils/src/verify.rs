use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, schemars::JsonSchema)]
pub struct Verdict {
    /// 1-based blank number.
    pub position: usize,
    pub expected: String,
    pub given: String,
    pub correct: bool,
}

/// Splits a typed answer line into one answer per blank.
pub fn split_answers(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Grades answers blank by blank. Only positions present in both lists are
/// graded, and only an exact match counts.
pub fn verify_answers<E, A>(expected: &[E], answers: &[A]) -> Vec<Verdict>
where
    E: AsRef<str>,
    A: AsRef<str>,
{
    expected
        .iter()
        .zip(answers)
        .enumerate()
        .map(|(i, (expected, given))| {
            let (expected, given) = (expected.as_ref(), given.as_ref());
            Verdict {
                position: i + 1,
                expected: expected.to_string(),
                given: given.to_string(),
                correct: expected == given,
            }
        })
        .collect()
}

pub fn count_correct(verdicts: &[Verdict]) -> usize {
    verdicts.iter().filter(|v| v.correct).count()
}
