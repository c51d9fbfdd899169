//! Property tests for path pattern matching

use overlay_registry::route::{captures, matches};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_.~-]{1,12}"
}

proptest! {
    #[test]
    fn dynamic_segment_matches_any_single_segment(value in segment()) {
        let path = format!("/x/{}", value);
        prop_assert!(matches("/x/[id]", &path));
        let params = captures("/x/[id]", &path).unwrap();
        prop_assert_eq!(params.get("id"), Some(&value));
    }

    #[test]
    fn extra_segment_never_matches(a in segment(), b in segment()) {
        let path = format!("/x/{}/{}", a, b);
        prop_assert!(!matches("/x/[id]", &path));
    }

    #[test]
    fn literal_segments_must_be_equal(a in segment(), b in segment()) {
        let pattern = format!("/lit/{}", a);
        let path = format!("/lit/{}", b);
        prop_assert_eq!(matches(&pattern, &path), a == b);
    }

    #[test]
    fn wildcard_in_middle(a in segment(), tail in segment()) {
        let pattern = format!("/shop/[shop]/{}", tail);
        let path = format!("/shop/{}/{}", a, tail);
        prop_assert!(matches(&pattern, &path));
    }
}
