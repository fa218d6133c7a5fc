#![no_main]

use fieldcheck::message::substitute;
use libfuzzer_sys::fuzz_target;
use std::collections::HashMap;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let split = data[0] as usize % data.len().max(1);
    let (template_bytes, token_bytes) = data.split_at(split.min(data.len()));

    let template = String::from_utf8_lossy(template_bytes);
    let token = String::from_utf8_lossy(token_bytes);

    let mut tokens = HashMap::new();
    tokens.insert("attribute".to_string(), token.to_string());
    tokens.insert(token.to_string(), "replacement".to_string());

    let _ = substitute(&template, &tokens);
});
