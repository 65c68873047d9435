//! Capture-group template expansion.
//!
//! The template language has exactly two escapes:
//! - `$` followed by one or more ASCII digits is replaced by that capture
//!   group's text. Groups that did not participate, and indexes past the
//!   pattern's group count, expand to the empty string.
//! - `$$` is a literal `$`.
//!
//! Any other `$` (including a trailing one) is copied through unchanged.
//! Unlike [`regex::Captures::expand`], there are no named references and
//! digits are consumed greedily, so `$1x` is group 1 followed by `x`.

use regex::Captures;

/// Expand `template` against the captures of a successful match.
pub fn expand(template: &str, captures: &Captures<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(tail) = after.strip_prefix('$') {
            out.push('$');
            rest = tail;
            continue;
        }

        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            out.push('$');
            rest = after;
            continue;
        }

        // An index too large for usize cannot name a group either.
        if let Some(group) = after[..digits]
            .parse::<usize>()
            .ok()
            .and_then(|index| captures.get(index))
        {
            out.push_str(group.as_str());
        }
        rest = &after[digits..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn expand_with(pattern: &str, subject: &str, template: &str) -> String {
        let re = Regex::new(pattern).unwrap();
        let caps = re.captures(subject).unwrap();
        expand(template, &caps)
    }

    #[test]
    fn test_positional_groups() {
        assert_eq!(
            expand_with(r"^([^/]+)/(\w+)", "example.com/repo", "$2@$1"),
            "repo@example.com"
        );
    }

    #[test]
    fn test_group_zero_is_whole_match() {
        assert_eq!(expand_with(r"b+", "abbbc", "[$0]"), "[bbb]");
    }

    #[test]
    fn test_dollar_escape() {
        assert_eq!(expand_with(r"(x)", "x", "$$1"), "$1");
        assert_eq!(expand_with(r"(x)", "x", "a$$$$b"), "a$$b");
        assert_eq!(expand_with(r"(x)", "x", "$$$1"), "$x");
    }

    #[test]
    fn test_non_digit_dollar_passes_through() {
        assert_eq!(expand_with(r"(x)", "x", "$name/$"), "$name/$");
        assert_eq!(expand_with(r"(x)", "x", "cost: $ 5"), "cost: $ 5");
    }

    #[test]
    fn test_digits_are_consumed_greedily() {
        assert_eq!(expand_with(r"(x)", "x", "$1y"), "xy");
        // "$10" is group ten, which does not exist, not group one then "0".
        assert_eq!(expand_with(r"(x)", "x", "<$10>"), "<>");
    }

    #[test]
    fn test_non_participating_group_is_empty() {
        assert_eq!(expand_with(r"^(a)(?::(\d+))?$", "a", "$1:$2!"), "a:!");
    }

    #[test]
    fn test_out_of_range_group_is_empty() {
        assert_eq!(expand_with(r"^(a)", "a", "$1-$2-$99"), "a--");
        assert_eq!(
            expand_with(r"^(a)", "a", "$99999999999999999999999"),
            ""
        );
    }

    #[test]
    fn test_expansion_is_repeatable() {
        let re = Regex::new(r"^([^/]+)/(.*)$").unwrap();
        let caps = re.captures("host/a/b").unwrap();
        let first = expand("ssh://git@$1/$2", &caps);
        let second = expand("ssh://git@$1/$2", &caps);
        assert_eq!(first, second);
        assert_eq!(first, "ssh://git@host/a/b");
    }

    #[test]
    fn test_template_without_escapes_is_unchanged() {
        assert_eq!(expand_with(r"x", "x", "git"), "git");
        assert_eq!(expand_with(r"x", "x", ""), "");
    }
}
