use email_address::EmailAddress;

pub const MAX_NAME_CHARS: usize = 128;
pub const MAX_KEY_CHARS: usize = 64;

/// checks that the string has no leading/trailing whitespace or control
/// characters and no more than max_chars characters
pub fn check_control_leading_trailing<G>(
    given: G,
    max_chars: Option<usize>
) -> bool
where
    G: AsRef<str>
{
    let given_ref = given.as_ref();

    if let Some(ch) = given_ref.chars().next() {
        if ch.is_whitespace() {
            return false;
        }
    }

    if let Some(ch) = given_ref.chars().next_back() {
        if ch.is_whitespace() {
            return false;
        }
    }

    let mut char_count = 0;

    for ch in given_ref.chars() {
        if ch.is_control() {
            return false;
        }

        char_count += 1;

        if let Some(max) = max_chars {
            if char_count > max {
                return false;
            }
        }
    }

    true
}

/// checks that the string has no whitespace or control characters at all
pub fn check_control_whitespace<G>(
    given: G,
    max_chars: Option<usize>
) -> bool
where
    G: AsRef<str>
{
    let mut char_count = 0;

    for ch in given.as_ref().chars() {
        if ch.is_control() || ch.is_whitespace() {
            return false;
        }

        char_count += 1;

        if let Some(max) = max_chars {
            if char_count > max {
                return false;
            }
        }
    }

    true
}

pub fn name_valid(given: &str) -> bool {
    !given.is_empty() && check_control_leading_trailing(given, Some(MAX_NAME_CHARS))
}

/// category keys are used as a single url path segment
pub fn key_valid(given: &str) -> bool {
    !given.is_empty() &&
        !given.chars().all(|ch| ch == '.') &&
        !given.contains(|ch: char| matches!(ch, '/' | '\\' | '?' | '#' | '%')) &&
        check_control_whitespace(given, Some(MAX_KEY_CHARS))
}

pub fn email_valid(given: &str) -> bool {
    EmailAddress::is_valid(given)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn check_control_leading_trailing_whitespace_chars() {
        assert!(!check_control_leading_trailing(" concert", None), "leading whitespace characters");
        assert!(!check_control_leading_trailing("concert ", None), "trailing whitespace characters");
        assert!(check_control_leading_trailing("jazz concert", None), "inner whitespace characters");
    }

    #[test]
    fn check_control_leading_trailing_control_chars() {
        assert!(!check_control_leading_trailing("concert\u{0000}", None), "trailing control characters");
        assert!(!check_control_leading_trailing("\u{0000}concert", None), "leading control characters");
        assert!(!check_control_leading_trailing("jazz\u{0000}concert", None), "contains control characters");
    }

    #[test]
    fn check_control_leading_trailing_max_length() {
        let k = String::from("abcdefghijklmnopqrstuvwxyzA");
        let count = k.chars().count();

        assert!(!check_control_leading_trailing(&k, Some(count - 1)), "max {} total {}", count - 1, count);
        assert!(check_control_leading_trailing(&k, Some(count)), "max {} total {}", count, count);
    }

    #[test]
    fn check_control_whitespace_chars() {
        assert!(!check_control_whitespace(" music", None), "leading whitespace characters");
        assert!(!check_control_whitespace("live music", None), "contains whitespace characters");
        assert!(!check_control_whitespace("music\u{0000}", None), "contains control characters");
        assert!(check_control_whitespace("live-music", None));
    }

    #[test]
    fn name_and_key_validation() {
        assert!(name_valid("Festival d'été"));
        assert!(!name_valid(""));
        assert!(key_valid("music"));
        assert!(!key_valid("live music"));
        assert!(!key_valid(""));

        for given in ["..", ".", "../users/1", "rock?x=1", "a#b", "a%2Fb", "a\\b"] {
            assert!(!key_valid(given), "key should be rejected {:?}", given);
        }

        assert!(key_valid("hip-hop.2025"));
    }

    #[test]
    fn email_validation() {
        for valid in ["admin@veevent.com", "a.b@c.fr"] {
            assert!(email_valid(valid), "valid email failed {:?}", valid);
        }

        for invalid in ["", "admin", "@veevent.com", "admin@", "ad min@veevent.com"] {
            assert!(!email_valid(invalid), "invalid email passed {:?}", invalid);
        }
    }
}
