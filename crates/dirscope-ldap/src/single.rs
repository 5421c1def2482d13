//! Single-result assertion

use dirscope_core::{Error, Result};

/// Take the only element of a result set.
///
/// Fails with [`Error::MultipleResults`] when more than one entity matched and
/// with [`Error::NoResult`] when nothing did.
pub fn assert_single<T>(entities: Vec<T>) -> Result<T> {
    if entities.len() > 1 {
        return Err(Error::MultipleResults(entities.len()));
    }

    entities.into_iter().next().ok_or(Error::NoResult)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_element_is_returned_unchanged() {
        assert_eq!(assert_single(vec!["alice"]).unwrap(), "alice");
    }

    #[test]
    fn test_two_elements_report_count() {
        let err = assert_single(vec![1, 2]).unwrap_err();
        assert!(matches!(err, Error::MultipleResults(2)));
        assert!(err.to_string().contains("(2)"));
    }

    #[test]
    fn test_empty_result_set() {
        let err = assert_single(Vec::<u32>::new()).unwrap_err();
        assert!(matches!(err, Error::NoResult));
    }
}
