#![no_main]
use async_stringify::{Identity, Space, Value, render, stringify};
use futures::executor::block_on;
use libfuzzer_sys::fuzz_target;

// The identity replacer must agree with the reference renderer, and a second
// pass over the parsed output must reproduce it.
fuzz_target!(|data: &[u8]| {
    let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let indent = data.first().map(|b| (*b % 12) as usize);
    let space = indent.map(Space::Count);

    let reference = render(&Value::from(json.clone()), space.as_ref())
        .expect("plain JSON always renders");
    let resolved = block_on(stringify(Value::from(json), &Identity, space.clone()))
        .expect("plain JSON always stringifies");
    if resolved != reference {
        panic!(
            "Differential fuzzing: engine and renderer disagree!\nEngine: {:?}\nRenderer: {:?}",
            resolved, reference
        );
    }

    let Some(text) = resolved else {
        panic!("plain JSON has a JSON form");
    };
    let reparsed: serde_json::Value = serde_json::from_str(&text).expect("output parses");
    let again = block_on(stringify(Value::from(reparsed), &Identity, space))
        .expect("reparsed JSON stringifies");
    assert_eq!(again.as_deref(), Some(text.as_str()));
});
