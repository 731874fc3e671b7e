use crate::models::listing::Listing;

/// Concatenate two per-source batches: all of `first`, then all of `second`.
///
/// No deduplication happens here. The same posting seen on both sources
/// shows up twice.
pub fn combine(mut first: Vec<Listing>, second: Vec<Listing>) -> Vec<Listing> {
    first.extend(second);
    first
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(title: &str) -> Listing {
        Listing {
            title: title.to_string(),
            salary: None,
            location: "Remote".to_string(),
        }
    }

    #[test]
    fn keeps_both_inputs_in_order() {
        let combined = combine(
            vec![listing("a1"), listing("a2")],
            vec![listing("b1"), listing("b2"), listing("b3")],
        );
        let titles: Vec<&str> = combined.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, ["a1", "a2", "b1", "b2", "b3"]);
    }

    #[test]
    fn tolerates_empty_inputs() {
        assert!(combine(vec![], vec![]).is_empty());
        assert_eq!(combine(vec![listing("a")], vec![]).len(), 1);
        assert_eq!(combine(vec![], vec![listing("b")])[0].title, "b");
    }

    #[test]
    fn does_not_deduplicate() {
        let combined = combine(vec![listing("same")], vec![listing("same")]);
        assert_eq!(combined.len(), 2);
    }
}
