//! Reference extraction from model output
//!
//! The model cites matching items by their 1-based position in the image set
//! it was shown. Every maximal run of ASCII digits in the reply is treated as
//! a candidate reference; runs that fall outside the set are dropped.
//! Numbers that mean something else ("3-4 outfits") cannot be told apart
//! from references and are kept when in range.

use super::registry::ItemId;

use regex::Regex;
use std::sync::OnceLock;

fn digit_runs() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"))
}

/// Zero-based positions cited in `text` that fall within `[0, count)`
///
/// Positions are returned in textual order with duplicates preserved.
///
/// # Examples
///
/// ```
/// use wardrobe::stylist::extractor::extract_positions;
///
/// assert_eq!(extract_positions("I'd go with 1 and 3, looking fresh!", 3), vec![0, 2]);
/// assert_eq!(extract_positions("Try look 5!", 2), Vec::<usize>::new());
/// ```
pub fn extract_positions(text: &str, count: usize) -> Vec<usize> {
    digit_runs()
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<usize>().ok())
        .filter_map(|n| n.checked_sub(1))
        .filter(|&pos| pos < count)
        .collect()
}

/// Maps the references cited in `text` onto the available items
///
/// # Arguments
///
/// * `text` - Raw model response
/// * `available` - Identifiers of the available items, in the order the
///   model was shown them
///
/// # Returns
///
/// Identifiers in the order they are cited; empty when nothing matches
pub fn extract_references(text: &str, available: &[ItemId]) -> Vec<ItemId> {
    let references: Vec<ItemId> = extract_positions(text, available.len())
        .into_iter()
        .map(|pos| available[pos])
        .collect();

    tracing::debug!(
        "Extracted {} references from {} available items",
        references.len(),
        available.len()
    );

    references
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<ItemId> {
        (0..n).map(|_| ItemId::new()).collect()
    }

    #[test]
    fn test_two_matches_out_of_three() {
        let available = ids(3);
        let refs = extract_references("I'd go with 1 and 3, looking fresh!", &available);
        assert_eq!(refs, vec![available[0], available[2]]);
    }

    #[test]
    fn test_no_digits_is_empty() {
        let available = ids(2);
        let refs = extract_references("You don't have a match for that, bestie.", &available);
        assert!(refs.is_empty());
    }

    #[test]
    fn test_out_of_range_is_dropped() {
        let available = ids(2);
        assert!(extract_references("Try look 5!", &available).is_empty());
    }

    #[test]
    fn test_zero_is_never_a_reference() {
        assert!(extract_positions("0 or 00", 5).is_empty());
    }

    #[test]
    fn test_duplicates_and_order_preserved() {
        assert_eq!(extract_positions("3, then 1, then 3 again", 3), vec![2, 0, 2]);
    }

    #[test]
    fn test_adjacent_digits_form_one_run() {
        assert_eq!(extract_positions("look12", 20), vec![11]);
        assert!(extract_positions("look12", 3).is_empty());
    }

    #[test]
    fn test_overflowing_run_is_out_of_range() {
        let huge = "99999999999999999999999999999999 and 2";
        assert_eq!(extract_positions(huge, 3), vec![1]);
    }

    #[test]
    fn test_non_ascii_digits_ignored() {
        assert!(extract_positions("item \u{0661}\u{0662}", 20).is_empty());
    }

    #[test]
    fn test_empty_available_set() {
        assert!(extract_references("1 2 3", &[]).is_empty());
    }

    #[test]
    fn test_positions_always_in_range() {
        let text = "1 2 3 4 5 6 7 8 9 10 11 12 0 100";
        for count in 0..15 {
            assert!(extract_positions(text, count).iter().all(|&p| p < count));
        }
    }
}
