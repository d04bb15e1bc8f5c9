//! Pure field rules. Callers decide on messaging.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

/// True iff `value` has the `local@domain.tld` shape.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Exact comparison, no trimming or case folding.
pub fn passwords_match(pwd: &str, retype: &str) -> bool {
    pwd == retype
}

/// Guards against booking a player against themselves.
pub fn players_distinct(player1: &str, player2: &str) -> bool {
    player1 != player2
}

/// True iff the value is not the empty string. Whitespace counts as input.
pub fn is_filled(value: &str) -> bool {
    !value.is_empty()
}
