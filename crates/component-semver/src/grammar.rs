//! Regular grammar for versions and ranges
//!
//! Every pattern is built by substitution from the ones defined before it and
//! compiled exactly once. `\d` is spelled `[0-9]` throughout so that only ASCII
//! digits are accepted.

use lazy_static::lazy_static;
use regex::Regex;

/// Named entries of the grammar table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// A single `0`, or a non-zero digit followed by digits
    NumericIdentifier,
    NumericIdentifierLoose,
    /// Digits followed by a letter or hyphen, then letters, digits or hyphens
    NonNumericIdentifier,
    /// `MAJOR.MINOR.PATCH`, each captured
    MainVersion,
    MainVersionLoose,
    PrereleaseIdentifier,
    PrereleaseIdentifierLoose,
    /// `-` followed by dot-separated prerelease identifiers (captured)
    Prerelease,
    PrereleaseLoose,
    BuildIdentifier,
    /// `+` followed by dot-separated build identifiers (captured)
    Build,
    FullPlain,
    /// Anchored full version
    Full,
    LoosePlain,
    /// `<`, `>`, `<=`, `>=`, `=` or nothing
    Gtlt,
    /// Numeric identifier or one of `x`, `X`, `*`
    XRangeIdentifier,
    XRangePlain,
    XRange,
    LoneTilde,
    TildeTrim,
    Tilde,
    LoneCaret,
    CaretTrim,
    Caret,
    /// A bare comparator, or the empty string for "any version"
    Comparator,
    /// Whitespace between an operator and its operand
    ComparatorTrim,
    HyphenRange,
    Star,
    /// `>=0.0.0`, equivalent to any version
    Gte0,
}

impl Token {
    pub const ALL: [Token; 29] = [
        Token::NumericIdentifier,
        Token::NumericIdentifierLoose,
        Token::NonNumericIdentifier,
        Token::MainVersion,
        Token::MainVersionLoose,
        Token::PrereleaseIdentifier,
        Token::PrereleaseIdentifierLoose,
        Token::Prerelease,
        Token::PrereleaseLoose,
        Token::BuildIdentifier,
        Token::Build,
        Token::FullPlain,
        Token::Full,
        Token::LoosePlain,
        Token::Gtlt,
        Token::XRangeIdentifier,
        Token::XRangePlain,
        Token::XRange,
        Token::LoneTilde,
        Token::TildeTrim,
        Token::Tilde,
        Token::LoneCaret,
        Token::CaretTrim,
        Token::Caret,
        Token::Comparator,
        Token::ComparatorTrim,
        Token::HyphenRange,
        Token::Star,
        Token::Gte0,
    ];

    /// Upper-case table name of the token
    pub fn name(&self) -> &'static str {
        match self {
            Token::NumericIdentifier => "NUMERICIDENTIFIER",
            Token::NumericIdentifierLoose => "NUMERICIDENTIFIERLOOSE",
            Token::NonNumericIdentifier => "NONNUMERICIDENTIFIER",
            Token::MainVersion => "MAINVERSION",
            Token::MainVersionLoose => "MAINVERSIONLOOSE",
            Token::PrereleaseIdentifier => "PRERELEASEIDENTIFIER",
            Token::PrereleaseIdentifierLoose => "PRERELEASEIDENTIFIERLOOSE",
            Token::Prerelease => "PRERELEASE",
            Token::PrereleaseLoose => "PRERELEASELOOSE",
            Token::BuildIdentifier => "BUILDIDENTIFIER",
            Token::Build => "BUILD",
            Token::FullPlain => "FULLPLAIN",
            Token::Full => "FULL",
            Token::LoosePlain => "LOOSEPLAIN",
            Token::Gtlt => "GTLT",
            Token::XRangeIdentifier => "XRANGEIDENTIFIER",
            Token::XRangePlain => "XRANGEPLAIN",
            Token::XRange => "XRANGE",
            Token::LoneTilde => "LONETILDE",
            Token::TildeTrim => "TILDETRIM",
            Token::Tilde => "TILDE",
            Token::LoneCaret => "LONECARET",
            Token::CaretTrim => "CARETTRIM",
            Token::Caret => "CARET",
            Token::Comparator => "COMPARATOR",
            Token::ComparatorTrim => "COMPARATORTRIM",
            Token::HyphenRange => "HYPHENRANGE",
            Token::Star => "STAR",
            Token::Gte0 => "GTE0",
        }
    }

    /// Look a token up by its table name
    pub fn by_name(name: &str) -> Option<Token> {
        Token::ALL.iter().copied().find(|t| t.name() == name)
    }
}

/// Replacement for [`Token::TildeTrim`]: `~ 1.2.3` => `~1.2.3`
pub const TILDE_TRIM_REPLACE: &str = "${1}~";
/// Replacement for [`Token::CaretTrim`]: `^ 1.2.3` => `^1.2.3`
pub const CARET_TRIM_REPLACE: &str = "${1}^";
/// Replacement for [`Token::ComparatorTrim`]: `> 1.2.3` => `>1.2.3`
pub const COMPARATOR_TRIM_REPLACE: &str = "${1}${2}${3}";

lazy_static! {
    static ref SOURCES: Vec<String> = build_sources();

    static ref PATTERNS: Vec<Regex> = SOURCES
        .iter()
        .map(|src| Regex::new(src).unwrap())
        .collect();

    /// Separator between `||` alternatives
    pub static ref OR_SPLIT: Regex = Regex::new(r"\s*\|\|\s*").unwrap();

    /// Separator between ANDed comparator tokens
    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Compiled pattern for a token
pub fn get(token: Token) -> &'static Regex {
    &PATTERNS[token as usize]
}

/// Uncompiled source of a token
pub fn source(token: Token) -> &'static str {
    &SOURCES[token as usize]
}

/// Compiled pattern by table name
pub fn lookup(name: &str) -> Option<&'static Regex> {
    Token::by_name(name).map(get)
}

// Order of the returned vector must follow the declaration order of `Token`.
fn build_sources() -> Vec<String> {
    let numeric = "0|[1-9][0-9]*".to_string();
    let numeric_loose = "[0-9]+".to_string();
    let non_numeric = "[0-9]*[a-zA-Z-][a-zA-Z0-9-]*".to_string();

    let main_version = format!(r"({numeric})\.({numeric})\.({numeric})");
    let main_version_loose = format!(r"({numeric_loose})\.({numeric_loose})\.({numeric_loose})");

    let pre_identifier = format!("(?:{numeric}|{non_numeric})");
    let pre_identifier_loose = format!("(?:{numeric_loose}|{non_numeric})");

    let prerelease = format!(r"(?:-({pre_identifier}(?:\.{pre_identifier})*))");
    let prerelease_loose = format!(r"(?:-?({pre_identifier_loose}(?:\.{pre_identifier_loose})*))");

    let build_identifier = "[0-9A-Za-z-]+".to_string();
    let build = format!(r"(?:\+({build_identifier}(?:\.{build_identifier})*))");

    // Only major, minor, patch and prerelease matter for comparison; build is
    // captured so it can be carried through formatting.
    let full_plain = format!("v?{main_version}{prerelease}?{build}?");
    let full = format!("^{full_plain}$");

    // Like full, but allows `=1.2.3` and `1.0.0alpha1`.
    let loose_plain = format!(r"[v=\s]*{main_version_loose}{prerelease_loose}?{build}?");

    let gtlt = "((?:<|>)?=?)".to_string();

    // "x.x" is a valid x-range identifier meaning "any version"; only the
    // first component is required.
    let xrange_identifier = format!(r"{numeric}|x|X|\*");
    let xrange_plain = format!(
        r"[v=\s]*({xrange_identifier})(?:\.({xrange_identifier})(?:\.({xrange_identifier})(?:{prerelease})?{build}?)?)?"
    );
    let xrange = format!(r"^{gtlt}\s*{xrange_plain}$");

    let lone_tilde = "(?:~>?)".to_string();
    let tilde_trim = format!(r"(\s*){lone_tilde}\s+");
    let tilde = format!("^{lone_tilde}{xrange_plain}$");

    let lone_caret = r"(?:\^)".to_string();
    let caret_trim = format!(r"(\s*){lone_caret}\s+");
    let caret = format!("^{lone_caret}{xrange_plain}$");

    let comparator = format!(r"^{gtlt}\s*({full_plain})$|^$");
    let comparator_trim = format!(r"(\s*){gtlt}\s*({loose_plain}|{xrange_plain})");

    let hyphen_range = format!(r"^\s*({xrange_plain})\s+-\s+({xrange_plain})\s*$");

    let star = r"(<|>)?=?\s*\*".to_string();
    let gte0 = r"^\s*>=\s*0\.0\.0\s*$".to_string();

    vec![
        numeric,
        numeric_loose,
        non_numeric,
        main_version,
        main_version_loose,
        pre_identifier,
        pre_identifier_loose,
        prerelease,
        prerelease_loose,
        build_identifier,
        build,
        full_plain,
        full,
        loose_plain,
        gtlt,
        xrange_identifier,
        xrange_plain,
        xrange,
        lone_tilde,
        tilde_trim,
        tilde,
        lone_caret,
        caret_trim,
        caret,
        comparator,
        comparator_trim,
        hyphen_range,
        star,
        gte0,
    ]
}
