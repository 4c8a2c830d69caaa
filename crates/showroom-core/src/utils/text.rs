//! String utility functions used by the form rules.

/// Escapes `&`, `<`, and `>` to their HTML entities.
///
/// Ampersands are replaced first so the entities produced for angle
/// brackets are not escaped twice. Quotes are left alone; the escaped text
/// is only ever placed in element content.
///
/// # Examples
///
/// ```
/// use showroom_core::utils::text::escape_html;
///
/// assert_eq!(escape_html("<script>&"), "&lt;script&gt;&amp;");
/// assert_eq!(escape_html("plain text"), "plain text");
/// assert_eq!(escape_html(""), "");
/// ```
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Keeps only the ASCII digits of `s`.
///
/// # Examples
///
/// ```
/// use showroom_core::utils::text::digits_only;
///
/// assert_eq!(digits_only("+91 98765-43210"), "919876543210");
/// assert_eq!(digits_only("(987) 654 3210"), "9876543210");
/// assert_eq!(digits_only("no digits"), "");
/// ```
pub fn digits_only(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

/// Returns `true` if `s` is empty or whitespace only.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Length of `s` in characters rather than bytes.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
