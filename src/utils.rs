// Utility modules

/// Word characters as pre-registration email validation defines them:
/// ASCII letters, digits and underscore.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Validates `local@label.label` style addresses: local part of word chars,
/// dots and hyphens, at least two dotted domain labels, final label of two or
/// more characters.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty()
        || !local
            .chars()
            .all(|c| is_word_char(c) || c == '-' || c == '.')
    {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    if !labels
        .iter()
        .all(|label| !label.is_empty() && label.chars().all(|c| is_word_char(c) || c == '-'))
    {
        return false;
    }

    // Top-level label must be at least two characters.
    labels.last().is_some_and(|tld| tld.len() >= 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        assert!(is_valid_email("player@example.com"));
        assert!(is_valid_email("first.last@mail.example.co"));
        assert!(is_valid_email("user_name-1@sub-domain.example.io"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@nodots"));
        assert!(!is_valid_email("user@example."));
        assert!(!is_valid_email("user@example.c"));
        assert!(!is_valid_email("user@exa mple.com"));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("user@@example.com"));
    }
}
