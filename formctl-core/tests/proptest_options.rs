use formctl_core::{OptionSet, OPTION_DELIMITER};
use proptest::prelude::*;

// Option values as users type them: anything but the delimiter
fn arb_option() -> impl Strategy<Value = String> {
    "[^,]{0,12}"
}

proptest! {
    /// Property: wire text survives parse + join unchanged, commas and all
    #[test]
    fn prop_wire_text_is_preserved(wire in ".{0,64}") {
        prop_assert_eq!(OptionSet::parse(&wire).to_wire(), wire);
    }

    /// Property: no parsed option ever contains the delimiter
    #[test]
    fn prop_parsed_options_are_delimiter_free(wire in ".{0,64}") {
        let set = OptionSet::parse(&wire);
        prop_assert!(set.iter().all(|o| !o.contains(OPTION_DELIMITER)));
    }

    /// Property: every set `new` accepts reads back identical from its wire form
    #[test]
    fn prop_accepted_sets_round_trip(values in prop::collection::vec(arb_option(), 0..8)) {
        if let Ok(set) = OptionSet::new(values.clone()) {
            prop_assert_eq!(OptionSet::parse(&set.to_wire()), set);
        } else {
            prop_assert_eq!(values, vec![String::new()]);
        }
    }

    /// Property: any value holding the delimiter is rejected
    #[test]
    fn prop_delimiter_is_rejected(prefix in arb_option(), suffix in arb_option()) {
        let bad = format!("{prefix},{suffix}");
        prop_assert!(OptionSet::new([bad]).is_err());
    }
}
