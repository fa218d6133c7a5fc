use fieldcheck::parse::{parse_rule, parse_rule_spec};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn parsing_never_panics(spec in "\\PC{0,60}") {
        let _ = parse_rule_spec(&spec);
    }

    #[test]
    fn empty_and_whitespace_specs_parse_to_nothing(spaces in " {0,10}") {
        prop_assert!(parse_rule_spec(&spaces).is_empty());
    }

    #[test]
    fn piece_count_matches_pipe_count(
        pieces in prop::collection::vec("[a-z_]{1,10}", 1..6),
    ) {
        let spec = pieces.join("|");
        let parsed = parse_rule_spec(&spec);
        prop_assert_eq!(parsed.len(), pieces.len());
        for (rule, piece) in parsed.iter().zip(&pieces) {
            prop_assert_eq!(&rule.name, piece);
            prop_assert!(rule.parameters.is_empty());
        }
    }

    #[test]
    fn name_and_parameters_round_trip(
        name in "[a-z_]{1,12}",
        params in prop::collection::vec("[a-z0-9]{1,8}", 1..5),
    ) {
        let rule = parse_rule(&format!("{}:{}", name, params.join(",")));
        prop_assert_eq!(&rule.name, &name);
        prop_assert_eq!(&rule.parameters, &params);
        prop_assert_eq!(rule.requirement(), params.join(","));
    }

    #[test]
    fn first_colon_splits_name_from_requirement(
        name in "[a-z_]{1,12}",
        tail in "[a-z0-9:]{1,20}",
    ) {
        let rule = parse_rule(&format!("{}:{}", name, tail));
        prop_assert_eq!(&rule.name, &name);
        // Later colons belong to the requirement.
        prop_assert_eq!(rule.requirement(), tail);
    }

    #[test]
    fn fragments_are_trimmed(name in "[a-z_]{1,12}", param in "[a-z0-9]{1,8}") {
        let rule = parse_rule(&format!("  {}  :  {}  ", name, param));
        prop_assert_eq!(&rule.name, &name);
        prop_assert_eq!(&rule.parameters, &vec![param]);
    }
}
