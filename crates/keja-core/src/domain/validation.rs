use once_cell::sync::Lazy;
use regex::Regex;

/// Local (`0712 345 678`) or international (`+254712345678`) phone numbers.
pub(crate) static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 \-]{5,19}$").expect("phone regex is valid"));
