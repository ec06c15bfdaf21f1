//! Placeholder substitution for response templates.
//!
//! Two placeholder forms are recognised:
//! - `${nodeName}`: the target node identity
//! - `${argN}`: `args[N]` for N >= 1 written without leading zeros; index 0
//!   is the subcommand slot and is never substituted
//!
//! Anything that does not resolve is left in the output verbatim.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(?:(nodeName)|arg([1-9]\d*))\}").unwrap());

/// Render `template` for `node` with the caller's argument list.
///
/// Substitution is a single pass: text inserted for one placeholder is never
/// scanned for further placeholders.
pub fn render(template: &str, node: &str, args: &[String]) -> String {
    let rendered: Cow<'_, str> = PLACEHOLDER_REGEX.replace_all(template, |caps: &Captures<'_>| {
        if caps.get(1).is_some() {
            return node.to_string();
        }
        match caps[2].parse::<usize>() {
            Ok(n) if n < args.len() => args[n].clone(),
            _ => caps[0].to_string(),
        }
    });
    rendered.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn replaces_every_node_name() {
        let out = render("${nodeName}/${nodeName}: up", "imsi-1", &[]);
        assert_eq!(out, "imsi-1/imsi-1: up");
        assert!(!out.contains("${nodeName}"));
    }

    #[test]
    fn arg_index_skips_subcommand_slot() {
        let a = args(&["show", "cell-7", "verbose"]);
        assert_eq!(render("${arg1} ${arg2}", "n", &a), "cell-7 verbose");
    }

    #[test]
    fn arg_zero_is_never_substituted() {
        let a = args(&["show", "x"]);
        assert_eq!(render("${arg0}", "n", &a), "${arg0}");
    }

    #[test]
    fn out_of_range_arg_passes_through() {
        let a = args(&["show"]);
        assert_eq!(render("got ${arg1} and ${arg12}", "n", &a), "got ${arg1} and ${arg12}");
    }

    #[test]
    fn oversized_index_passes_through() {
        let t = "${arg99999999999999999999999}";
        assert_eq!(render(t, "n", &args(&["a", "b"])), t);
    }

    #[test]
    fn inserted_text_is_not_rescanned() {
        let a = args(&["set", "${arg2}", "boom"]);
        assert_eq!(render("${arg1}", "${nodeName}", &a), "${arg2}");
        assert_eq!(render("${nodeName}", "${arg1}", &a), "${arg1}");
    }

    #[test]
    fn unknown_placeholders_are_left_alone() {
        assert_eq!(render("${node} ${argX} $arg1", "n", &args(&["a", "b"])), "${node} ${argX} $arg1");
        let a = args(&["show", "X"]);
        assert_eq!(render("${arg01}|${arg1}", "n", &a), "${arg01}|X");
        assert_eq!(render("${arg001} ${arg00}", "n", &a), "${arg001} ${arg00}");
    }

    #[test]
    fn multi_digit_indices_resolve() {
        let a: Vec<String> = (0..12).map(|i| format!("v{i}")).collect();
        assert_eq!(render("${arg10}-${arg1}", "n", &a), "v10-v1");
    }
}
