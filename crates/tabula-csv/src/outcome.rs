//! Combinators over sequences of results.
//!
//! Decoding never panics; it hands back a `Result` per cell, row or record.
//! These helpers are the explicit ways a caller folds many of those results
//! into one. Nothing here drops an error unless the caller picks a helper
//! whose purpose is to do so ([`successes`], [`partition`]).

/// Collect values, stopping at the first failure.
///
/// Returns the first `Err` in input order if there is one, otherwise `Ok`
/// of every value in input order. Items after the first failure are not
/// pulled from the iterator.
pub fn sequence<I, T, E>(items: I) -> Result<Vec<T>, E>
where
    I: IntoIterator<Item = Result<T, E>>,
{
    items.into_iter().collect()
}

/// Keep only successful values, discarding failures
pub fn successes<I, T, E>(items: I) -> impl Iterator<Item = T>
where
    I: IntoIterator<Item = Result<T, E>>,
{
    items.into_iter().filter_map(Result::ok)
}

/// Split results into successes and failures, both in input order
pub fn partition<I, T, E>(items: I) -> (Vec<T>, Vec<E>)
where
    I: IntoIterator<Item = Result<T, E>>,
{
    let mut oks = Vec::new();
    let mut errs = Vec::new();
    for item in items {
        match item {
            Ok(value) => oks.push(value),
            Err(error) => errs.push(error),
        }
    }
    (oks, errs)
}

/// Turn a failure into a fallback value
pub trait Recover<T, E> {
    /// Replace a failure with `default`
    fn recover(self, default: T) -> Result<T, E>;

    /// Replace a failure with a value computed from the error
    fn recover_with<F>(self, f: F) -> Result<T, E>
    where
        F: FnOnce(E) -> T;
}

impl<T, E> Recover<T, E> for Result<T, E> {
    fn recover(self, default: T) -> Self {
        Ok(self.unwrap_or(default))
    }

    fn recover_with<F>(self, f: F) -> Self
    where
        F: FnOnce(E) -> T,
    {
        Ok(self.unwrap_or_else(f))
    }
}
