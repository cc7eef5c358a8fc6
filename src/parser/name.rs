//! Display names for instance identifiers.

use regex::Regex;
use std::sync::OnceLock;

/// Turn a raw instance name into a display label
///
/// `u_gen_lanes__core_fetch_i` becomes `Core Fetch`: the `_i`/`_I` instance
/// suffix and `gen_*__` generate-block prefixes are dropped, the first `u_`
/// is removed, underscores become spaces and every word is capitalized.
pub fn prettify_name(name: &str) -> String {
    static SUFFIX: OnceLock<Regex> = OnceLock::new();
    static GENERATE: OnceLock<Regex> = OnceLock::new();

    let suffix = SUFFIX.get_or_init(|| Regex::new(r"_[iI]$").expect("valid suffix pattern"));
    let generate = GENERATE
        .get_or_init(|| Regex::new(r"gen_[a-zA-Z0-9_]*__").expect("valid generate pattern"));

    let pretty = suffix.replace(name, "");
    let pretty = generate.replace_all(&pretty, "");
    let pretty = pretty.replacen("u_", "", 1).replace('_', " ");

    title_case(&pretty)
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}
