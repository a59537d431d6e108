//! Rewrites one `||` alternative into plain, space separated comparators.
//!
//! Hyphen ranges, carets, tildes, x-ranges and stars are all expanded here so
//! that every remaining token matches the comparator grammar.

use regex::Captures;

use crate::error::ParseError;
use crate::grammar::{self, Token, CARET_TRIM_REPLACE, COMPARATOR_TRIM_REPLACE, TILDE_TRIM_REPLACE};

pub(crate) const NULL_SET: &str = "<0.0.0-0";

/// Normalize a single, already trimmed alternative
pub(crate) fn normalize(range: &str) -> Result<String, ParseError> {
    // `1.2.3 - 1.2.4` => `>=1.2.3 <=1.2.4`
    // The pattern is anchored at both ends, so a match replaces everything.
    let range = match grammar::get(Token::HyphenRange).captures(range) {
        Some(caps) => replace_hyphen(&caps, range)?,
        None => range.to_string(),
    };

    // `> 1.2.3 < 1.2.5` => `>1.2.3 <1.2.5`
    let range = grammar::get(Token::ComparatorTrim).replace_all(&range, COMPARATOR_TRIM_REPLACE);
    // `~ 1.2.3` => `~1.2.3`
    let range = grammar::get(Token::TildeTrim).replace_all(&range, TILDE_TRIM_REPLACE);
    // `^ 1.2.3` => `^1.2.3`
    let range = grammar::get(Token::CaretTrim).replace_all(&range, CARET_TRIM_REPLACE);

    let comparators = grammar::WHITESPACE
        .split(&range)
        .map(replace_comparator)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(comparators.join(" "))
}

/// Carets, tildes, x-ranges and stars, in that order
fn replace_comparator(comp: &str) -> Result<String, ParseError> {
    let comp = replace_each(comp, replace_caret)?;
    let comp = replace_each(&comp, replace_tilde)?;
    let comp = replace_each(&comp, replace_x_range)?;
    Ok(grammar::get(Token::Star).replace_all(&comp, "").into_owned())
}

fn replace_each(comp: &str, replace: fn(&str) -> Result<String, ParseError>) -> Result<String, ParseError> {
    let replaced = grammar::WHITESPACE
        .split(comp.trim())
        .map(replace)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(replaced.join(" "))
}

fn is_x(id: Option<&str>) -> bool {
    match id {
        None => true,
        Some(id) => {
            let id = id.trim();
            id.is_empty() || id.eq_ignore_ascii_case("x") || id == "*"
        }
    }
}

fn group<'t>(caps: &Captures<'t>, index: usize) -> Option<&'t str> {
    caps.get(index).map(|m| m.as_str())
}

/// Numeric component, `0` when absent
fn number(id: Option<&str>, token: &str) -> Result<u64, ParseError> {
    match id {
        None => Ok(0),
        Some(id) => id
            .parse()
            .map_err(|_| ParseError::InvalidComparator(token.to_string())),
    }
}

/// Numeric component plus one
fn next(id: Option<&str>, token: &str) -> Result<u64, ParseError> {
    number(id, token)?
        .checked_add(1)
        .ok_or_else(|| ParseError::InvalidComparator(token.to_string()))
}

// ~, ~> --> * (any)
// ~2, ~2.x, ~2.x.x, ~>2, ~>2.x ~>2.x.x --> >=2.0.0 <3.0.0-0
// ~2.0, ~2.0.x, ~>2.0, ~>2.0.x --> >=2.0.0 <2.1.0-0
// ~1.2, ~1.2.x, ~>1.2, ~>1.2.x --> >=1.2.0 <1.3.0-0
// ~1.2.3, ~>1.2.3 --> >=1.2.3 <1.3.0-0
fn replace_tilde(s: &str) -> Result<String, ParseError> {
    let Some(caps) = grammar::get(Token::Tilde).captures(s) else {
        return Ok(s.to_string());
    };
    let (major, minor, patch, pre) = (group(&caps, 1), group(&caps, 2), group(&caps, 3), group(&caps, 4));
    let (ma, mi, pa) = (major.unwrap_or("0"), minor.unwrap_or("0"), patch.unwrap_or("0"));

    let replaced = if is_x(major) {
        String::new()
    } else if is_x(minor) {
        format!(">={ma}.0.0 <{}.0.0-0", next(major, s)?)
    } else if is_x(patch) {
        format!(">={ma}.{mi}.0 <{ma}.{}.0-0", next(minor, s)?)
    } else if let Some(pre) = pre {
        format!(">={ma}.{mi}.{pa}-{pre} <{ma}.{}.0-0", next(minor, s)?)
    } else {
        format!(">={ma}.{mi}.{pa} <{ma}.{}.0-0", next(minor, s)?)
    };
    Ok(replaced)
}

// ^ --> * (any)
// ^2, ^2.x, ^2.x.x --> >=2.0.0 <3.0.0-0
// ^2.0, ^2.0.x --> >=2.0.0 <3.0.0-0
// ^1.2, ^1.2.x --> >=1.2.0 <2.0.0-0
// ^1.2.3 --> >=1.2.3 <2.0.0-0
// ^0.2.3 --> >=0.2.3 <0.3.0-0
// ^0.0.3 --> >=0.0.3 <0.0.4-0
fn replace_caret(s: &str) -> Result<String, ParseError> {
    let Some(caps) = grammar::get(Token::Caret).captures(s) else {
        return Ok(s.to_string());
    };
    let (major, minor, patch, pre) = (group(&caps, 1), group(&caps, 2), group(&caps, 3), group(&caps, 4));
    let (ma, mi, pa) = (major.unwrap_or("0"), minor.unwrap_or("0"), patch.unwrap_or("0"));
    let lower = match pre {
        Some(pre) => format!(">={ma}.{mi}.{pa}-{pre}"),
        None => format!(">={ma}.{mi}.{pa}"),
    };

    let replaced = if is_x(major) {
        String::new()
    } else if is_x(minor) {
        format!(">={ma}.0.0 <{}.0.0-0", next(major, s)?)
    } else if is_x(patch) {
        if ma == "0" {
            format!(">={ma}.{mi}.0 <{ma}.{}.0-0", next(minor, s)?)
        } else {
            format!(">={ma}.{mi}.0 <{}.0.0-0", next(major, s)?)
        }
    } else if ma == "0" {
        if mi == "0" {
            format!("{lower} <{ma}.{mi}.{}-0", next(patch, s)?)
        } else {
            format!("{lower} <{ma}.{}.0-0", next(minor, s)?)
        }
    } else {
        format!("{lower} <{}.0.0-0", next(major, s)?)
    };
    Ok(replaced)
}

fn replace_x_range(s: &str) -> Result<String, ParseError> {
    let Some(caps) = grammar::get(Token::XRange).captures(s) else {
        return Ok(s.to_string());
    };
    let mut gtlt = group(&caps, 1).unwrap_or("");
    let (major, minor, patch) = (group(&caps, 2), group(&caps, 3), group(&caps, 4));

    let x_major = is_x(major);
    let x_minor = x_major || is_x(minor);
    let x_patch = x_minor || is_x(patch);
    let any_x = x_patch;

    if gtlt == "=" && any_x {
        gtlt = "";
    }

    if x_major {
        return Ok(if gtlt == ">" || gtlt == "<" {
            // nothing is allowed
            NULL_SET.to_string()
        } else {
            // nothing is forbidden
            "*".to_string()
        });
    }

    if !gtlt.is_empty() && any_x {
        // patch is an x at this point, and minor may be one too
        let mut ma = number(major, s)?;
        let mut mi = if x_minor { 0 } else { number(minor, s)? };

        match gtlt {
            // >1 => >=2.0.0, >1.2 => >=1.3.0
            ">" => {
                gtlt = ">=";
                if x_minor {
                    ma = next(major, s)?;
                    mi = 0;
                } else {
                    mi = next(minor, s)?;
                }
            }
            // <=0.7.x is actually <0.8.0, since any 0.7.x should pass
            "<=" => {
                gtlt = "<";
                if x_minor {
                    ma = next(major, s)?;
                } else {
                    mi = next(minor, s)?;
                }
            }
            _ => {}
        }

        let pre = if gtlt == "<" { "-0" } else { "" };
        return Ok(format!("{gtlt}{ma}.{mi}.0{pre}"));
    }

    let ma = major.unwrap_or("0");
    if x_minor {
        Ok(format!(">={ma}.0.0 <{}.0.0-0", next(major, s)?))
    } else if x_patch {
        let mi = minor.unwrap_or("0");
        Ok(format!(">={ma}.{mi}.0 <{ma}.{}.0-0", next(minor, s)?))
    } else {
        Ok(s.to_string())
    }
}

// 1.2 - 3.4.5 => >=1.2.0 <=3.4.5
// 1.2.3 - 3.4 => >=1.2.3 <3.5.0-0 (any 3.4.x will do)
// 1.2 - 3.4 => >=1.2.0 <3.5.0-0
fn replace_hyphen(caps: &Captures<'_>, whole: &str) -> Result<String, ParseError> {
    let from = group(caps, 1).unwrap_or("");
    let (f_major, f_minor, f_patch) = (group(caps, 2), group(caps, 3), group(caps, 4));
    let to = group(caps, 7).unwrap_or("");
    let (t_major, t_minor, t_patch, t_pre) = (group(caps, 8), group(caps, 9), group(caps, 10), group(caps, 11));

    let from = if is_x(f_major) {
        String::new()
    } else if is_x(f_minor) {
        format!(">={}.0.0", f_major.unwrap_or("0"))
    } else if is_x(f_patch) {
        format!(">={}.{}.0", f_major.unwrap_or("0"), f_minor.unwrap_or("0"))
    } else {
        format!(">={from}")
    };

    let to = if is_x(t_major) {
        String::new()
    } else if is_x(t_minor) {
        format!("<{}.0.0-0", next(t_major, whole)?)
    } else if is_x(t_patch) {
        format!("<{}.{}.0-0", t_major.unwrap_or("0"), next(t_minor, whole)?)
    } else if let Some(pre) = t_pre {
        format!(
            "<={}.{}.{}-{pre}",
            t_major.unwrap_or("0"),
            t_minor.unwrap_or("0"),
            t_patch.unwrap_or("0")
        )
    } else {
        format!("<={to}")
    };

    Ok(format!("{from} {to}").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyphen() {
        assert_eq!(normalize("1.2.3 - 2.3.4").unwrap(), ">=1.2.3 <=2.3.4");
        assert_eq!(normalize("1.2 - 3.4.5").unwrap(), ">=1.2.0 <=3.4.5");
        assert_eq!(normalize("1.2.3 - 3.4").unwrap(), ">=1.2.3 <3.5.0-0");
        assert_eq!(normalize("1.2.3 - 3").unwrap(), ">=1.2.3 <4.0.0-0");
        assert_eq!(normalize("* - 2").unwrap(), "<3.0.0-0");
        assert_eq!(normalize("1 - *").unwrap(), ">=1.0.0");
        assert_eq!(normalize("1.2.3 - 2.0.0-pre+b").unwrap(), ">=1.2.3 <=2.0.0-pre");
    }

    #[test]
    fn test_caret() {
        assert_eq!(replace_caret("^1.2.3").unwrap(), ">=1.2.3 <2.0.0-0");
        assert_eq!(replace_caret("^0.2.3").unwrap(), ">=0.2.3 <0.3.0-0");
        assert_eq!(replace_caret("^0.0.3").unwrap(), ">=0.0.3 <0.0.4-0");
        assert_eq!(replace_caret("^0.0.3-beta").unwrap(), ">=0.0.3-beta <0.0.4-0");
        assert_eq!(replace_caret("^1.2").unwrap(), ">=1.2.0 <2.0.0-0");
        assert_eq!(replace_caret("^0.1").unwrap(), ">=0.1.0 <0.2.0-0");
        assert_eq!(replace_caret("^1").unwrap(), ">=1.0.0 <2.0.0-0");
        assert_eq!(replace_caret("^*").unwrap(), "");
        assert_eq!(replace_caret(">=1.2.3").unwrap(), ">=1.2.3");
    }

    #[test]
    fn test_tilde() {
        assert_eq!(replace_tilde("~1.2.3").unwrap(), ">=1.2.3 <1.3.0-0");
        assert_eq!(replace_tilde("~>1.2.3").unwrap(), ">=1.2.3 <1.3.0-0");
        assert_eq!(replace_tilde("~1.2").unwrap(), ">=1.2.0 <1.3.0-0");
        assert_eq!(replace_tilde("~1").unwrap(), ">=1.0.0 <2.0.0-0");
        assert_eq!(replace_tilde("~1.2.3-beta.2").unwrap(), ">=1.2.3-beta.2 <1.3.0-0");
        assert_eq!(replace_tilde("~x").unwrap(), "");
    }

    #[test]
    fn test_x_range() {
        assert_eq!(replace_x_range("1.2.x").unwrap(), ">=1.2.0 <1.3.0-0");
        assert_eq!(replace_x_range("2.*").unwrap(), ">=2.0.0 <3.0.0-0");
        assert_eq!(replace_x_range("*").unwrap(), "*");
        assert_eq!(replace_x_range(">*").unwrap(), NULL_SET);
        assert_eq!(replace_x_range("<x").unwrap(), NULL_SET);
        assert_eq!(replace_x_range(">=*").unwrap(), "*");
        assert_eq!(replace_x_range(">1").unwrap(), ">=2.0.0");
        assert_eq!(replace_x_range(">1.2").unwrap(), ">=1.3.0");
        assert_eq!(replace_x_range("<=0.7.x").unwrap(), "<0.8.0-0");
        assert_eq!(replace_x_range("<=7.x").unwrap(), "<8.0.0-0");
        assert_eq!(replace_x_range("<1.2").unwrap(), "<1.2.0-0");
        assert_eq!(replace_x_range(">=1.2").unwrap(), ">=1.2.0");
        assert_eq!(replace_x_range("=1.2").unwrap(), ">=1.2.0 <1.3.0-0");
        assert_eq!(replace_x_range("1.2.3").unwrap(), "1.2.3");
    }

    #[test]
    fn test_stars_are_removed() {
        assert_eq!(replace_comparator("*").unwrap(), "");
        assert_eq!(replace_comparator(">=*").unwrap(), "");
    }

    #[test]
    fn test_whitespace_trims() {
        assert_eq!(normalize(">= 1.2.3 < 2.0.0").unwrap(), ">=1.2.3 <2.0.0");
        assert_eq!(normalize("~ 1.2").unwrap(), ">=1.2.0 <1.3.0-0");
        assert_eq!(normalize("^ 1.2").unwrap(), ">=1.2.0 <2.0.0-0");
    }

    #[test]
    fn test_oversized_component() {
        let err = replace_caret("^18446744073709551615").unwrap_err();
        assert!(matches!(err, ParseError::InvalidComparator(_)));
    }
}
