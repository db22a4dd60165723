//! Ordered "first success" selection over candidate names.

use std::future::Future;

/// Outcome of trying candidates in order.
#[derive(Debug)]
pub enum Selection<T, E> {
    /// A candidate succeeded; `failures` holds every earlier attempt.
    Selected {
        name: String,
        value: T,
        failures: Vec<(String, E)>,
    },
    /// Every candidate failed, in the order they were tried.
    Exhausted { failures: Vec<(String, E)> },
}

impl<T, E> Selection<T, E> {
    #[must_use]
    pub fn failures(&self) -> &[(String, E)] {
        match self {
            Selection::Selected { failures, .. } | Selection::Exhausted { failures } => failures,
        }
    }
}

/// Try `attempt` on each candidate in order and stop at the first `Ok`.
///
/// Candidates after the winner are never attempted.
pub async fn first_success<T, E, F, Fut>(candidates: &[String], mut attempt: F) -> Selection<T, E>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut failures = Vec::new();

    for name in candidates {
        match attempt(name.clone()).await {
            Ok(value) => {
                return Selection::Selected {
                    name: name.clone(),
                    value,
                    failures,
                };
            }
            Err(e) => failures.push((name.clone(), e)),
        }
    }

    Selection::Exhausted { failures }
}
