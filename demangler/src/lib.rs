//! Symbol demangler for common mangling schemes.
//!
//! Entirely independent of instruction decoding: takes a mangled name and
//! returns a display string, or the input unchanged when no scheme matches.

use std::borrow::Cow;

mod rust_legacy;

pub fn demangle(s: &str) -> Cow<'_, str> {
    // linker-generated stub suffixes aren't part of the mangled name
    let stripped = s.strip_suffix("$got").unwrap_or(s);
    let stripped = stripped.strip_suffix("$plt").unwrap_or(stripped);
    let stripped = stripped.strip_suffix("$pltgot").unwrap_or(stripped);

    if let Some(name) = rust_legacy::parse(stripped) {
        return Cow::Owned(name);
    }

    Cow::Borrowed(s)
}

#[cfg(test)]
mod tests {
    use super::demangle;
    use std::borrow::Cow;

    #[test]
    fn unknown_scheme_is_passed_through() {
        assert!(matches!(demangle("main"), Cow::Borrowed("main")));
        assert!(matches!(demangle("_start"), Cow::Borrowed("_start")));
        assert!(matches!(demangle("??badness"), Cow::Borrowed("??badness")));
    }

    #[test]
    fn stub_suffixes_are_stripped() {
        assert_eq!(demangle("_ZN4testE$plt"), "test");
        assert_eq!(demangle("_ZN4testE$got"), "test");
        assert_eq!(demangle("_ZN4testE$pltgot"), "test");
    }
}
