//! Account-holder name vs legal name matching.
//!
//! Payout methods carry the bank account holder's name; accounts carry a
//! legal name. Hosts want to know whether they designate the same person
//! without tripping over accents, capitalization, punctuation or the
//! order in which given and family names were typed.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Returns `true` if both names consist of the same tokens.
///
/// Comparison ignores case, diacritics, punctuation and token order.
/// Every token must be present on both sides. Names without any letter or
/// digit never match.
///
/// # Example
///
/// ```
/// use hostkit_runtime::names::is_account_holder_name_and_legal_name_match;
///
/// assert!(is_account_holder_name_and_legal_name_match("José Martínez", "jose martinez"));
/// assert!(is_account_holder_name_and_legal_name_match("Martinez, Jose", "Jose Martinez"));
/// assert!(!is_account_holder_name_and_legal_name_match("Jose Martinez", "Jose"));
/// assert!(!is_account_holder_name_and_legal_name_match("", ""));
/// ```
#[must_use]
pub fn is_account_holder_name_and_legal_name_match(holder: &str, legal: &str) -> bool {
    let holder = name_tokens(holder);
    !holder.is_empty() && holder == name_tokens(legal)
}

/// Sorted, folded tokens of `name`.
fn name_tokens(name: &str) -> Vec<String> {
    let folded: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        // Apostrophes and dots join: O'Brien, St.John.
        .filter(|c| !matches!(c, '\'' | '’' | '.'))
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let mut tokens: Vec<String> = folded.split_whitespace().map(str::to_owned).collect();
    tokens.sort_unstable();
    tokens
}
