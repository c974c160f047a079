//! Name filter applied to every key that enters a [`Context`](crate::Context).

use std::sync::LazyLock;

use regex::Regex;

// Reserved words, future reserved words and literals that can never be a
// bare binding reference.
static RESERVED_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        "^(?:break|case|catch|continue|debugger|default|delete|do|else|finally|for|function\
         |if|in|instanceof|new|return|switch|this|throw|try|typeof|var|void|while|with\
         |class|const|enum|export|extends|import|super|implements|interface|let|package\
         |private|protected|public|static|yield|null|true|false)$",
    )
    .expect("reserved word pattern is a valid regex")
});

/// Returns true when `name` could appear as a bare identifier reference.
///
/// Rejects the empty string, anything not shaped like an IdentifierName
/// (leading digit, hyphen, whitespace, punctuation) and reserved words.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    is_identifier_start(first) && chars.all(is_identifier_continue) && !is_reserved_word(name)
}

pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORD.is_match(name)
}

fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_ascii_alphabetic() || unicode_id_start(ch)
}

fn is_identifier_continue(ch: char) -> bool {
    ch == '_'
        || ch == '$'
        || ch.is_ascii_alphanumeric()
        || ch == '\u{200C}'
        || ch == '\u{200D}'
        || unicode_id_continue(ch)
}

fn unicode_id_start(ch: char) -> bool {
    !ch.is_ascii() && unicode_ident::is_xid_start(ch)
}

fn unicode_id_continue(ch: char) -> bool {
    !ch.is_ascii() && unicode_ident::is_xid_continue(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        for name in ["foo", "_private", "$", "camelCase2", "undefined", "NaN", "café"] {
            assert!(is_identifier(name), "{name} should be accepted");
        }
    }

    #[test]
    fn rejects_leading_digit_and_hyphen() {
        assert!(!is_identifier("2foo"));
        assert!(!is_identifier("my-name"));
        assert!(!is_identifier("-"));
    }

    #[test]
    fn rejects_reserved_words_and_literals() {
        for name in ["for", "function", "class", "yield", "null", "true", "false"] {
            assert!(!is_identifier(name), "{name} should be rejected");
        }
    }

    #[test]
    fn reserved_words_only_match_whole_names() {
        assert!(is_identifier("format"));
        assert!(is_identifier("nullish"));
        assert!(is_identifier("newValue"));
    }

    #[test]
    fn rejects_non_identifier_shapes() {
        for name in ["", "a b", "a.b", "a;b", "x\n", "\u{200C}a"] {
            assert!(!is_identifier(name), "{name:?} should be rejected");
        }
    }
}
