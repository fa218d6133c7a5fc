#![no_main]

use fieldcheck::parse::{parse_rule, parse_rule_spec};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let spec = String::from_utf8_lossy(data);

    // Parsing is total: any input must produce a rule list without panicking.
    for rule in parse_rule_spec(&spec) {
        let _ = rule.requirement();
    }
    let _ = parse_rule(&spec);
});
