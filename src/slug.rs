/// Normalize free text into a URL-safe slug.
///
/// Everything outside `[A-Za-z0-9 ]` is dropped, except `-` which counts as a
/// word separator so an existing slug maps onto itself. Runs of separators
/// become a single hyphen, the ends are trimmed and the result is lowercased.
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .trim()
        .chars()
        .filter_map(|c| match c {
            '-' => Some(' '),
            c if c.is_ascii_alphanumeric() || c == ' ' => Some(c),
            _ => None,
        })
        .collect();

    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_ascii_lowercase()
}

/// Turn a slug back into a readable title: `hello-world` -> `Hello World`.
///
/// Lossy. Casing and punctuation dropped by [`slugify`] do not come back.
pub fn deslugify(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Title printed on the Open Graph card of a page. The site root has no slug.
pub fn og_title(slug: Option<&str>) -> String {
    deslugify(slug.unwrap_or("home"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_strips_punctuation() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
    }

    #[test]
    fn slugify_collapses_and_trims() {
        assert_eq!(slugify("  Machine   Learning  "), "machine-learning");
        assert_eq!(slugify("! leading bang"), "leading-bang");
        assert_eq!(slugify("Rust 2024 -- edition"), "rust-2024-edition");
    }

    #[test]
    fn slugify_empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("?!*"), "");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn slugify_drops_non_ascii() {
        assert_eq!(slugify("Café au lait"), "caf-au-lait");
    }

    #[test]
    fn slugify_is_idempotent() {
        for input in [
            "Hello, World!",
            "  a  b  ",
            "already-a-slug",
            "-dash-edges-",
            "Tabs\tand\nnewlines",
            "Über 9000 %",
            "",
        ] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn deslugify_capitalizes_words() {
        assert_eq!(deslugify("hello-world"), "Hello World");
        assert_eq!(deslugify("a-b-c"), "A B C");
        assert_eq!(deslugify(""), "");
    }

    #[test]
    fn deslugify_is_not_an_inverse() {
        assert_ne!(deslugify(&slugify("Hello, World!")), "Hello, World!");
    }

    #[test]
    fn og_title_defaults_to_home() {
        assert_eq!(og_title(None), "Home");
        assert_eq!(og_title(Some("distributed-systems")), "Distributed Systems");
    }
}
