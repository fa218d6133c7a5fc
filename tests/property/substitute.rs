use fieldcheck::message::substitute;
use proptest::prelude::*;
use std::collections::HashMap;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn substitution_never_panics(
        template in "\\PC{0,60}",
        key in "[a-z]{1,8}",
        value in "\\PC{0,20}",
    ) {
        let mut tokens = HashMap::new();
        tokens.insert(key, value);
        let _ = substitute(&template, &tokens);
    }

    #[test]
    fn template_without_colon_is_unchanged(template in "[a-zA-Z0-9 ]{0,40}") {
        let tokens = HashMap::new();
        prop_assert_eq!(substitute(&template, &tokens), template);
    }

    #[test]
    fn known_token_is_replaced_everywhere(
        key in "[a-z]{1,8}",
        value in "[A-Z]{1,8}",
        n in 1..4usize,
    ) {
        let mut tokens = HashMap::new();
        tokens.insert(key.clone(), value.clone());
        let template = vec![format!(":{}", key); n].join(" ");
        let expected = vec![value; n].join(" ");
        prop_assert_eq!(substitute(&template, &tokens), expected);
    }

    #[test]
    fn unknown_tokens_stay_literal(token in "[a-z]{1,8}") {
        let tokens = HashMap::new();
        let template = format!("keep :{} literal", token);
        prop_assert_eq!(substitute(&template, &tokens), template.clone());
    }
}
