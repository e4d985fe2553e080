//! String casing helpers

/// Title-case every word, then drop everything outside `[A-Za-z0-9]`.
///
/// A letter is upper-cased when it does not follow another letter and
/// lower-cased otherwise, so digits and punctuation start a new word.
///
/// ```
/// use sietch_common::casing::camel_case;
///
/// assert_eq!(camel_case("Gap Width"), "GapWidth");
/// assert_eq!(camel_case("x-pos"), "XPos");
/// ```
pub fn camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;

    for c in s.chars() {
        let is_letter = c.is_alphabetic();
        if is_letter {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
        } else {
            out.push(c);
        }
        prev_is_letter = is_letter;
    }

    out.retain(|c| c.is_ascii_alphanumeric());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_are_joined() {
        assert_eq!(camel_case("Gap Width"), "GapWidth");
        assert_eq!(camel_case("gap width"), "GapWidth");
        assert_eq!(camel_case("GAP WIDTH"), "GapWidth");
    }

    #[test]
    fn test_punctuation_splits_words() {
        assert_eq!(camel_case("x-pos"), "XPos");
        assert_eq!(camel_case("hole_1 (mm)"), "Hole1Mm");
    }

    #[test]
    fn test_digit_starts_new_word() {
        assert_eq!(camel_case("2nd hole"), "2NdHole");
    }

    #[test]
    fn test_non_ascii_letters_removed() {
        // the micro sign counts as a letter, so the following "m" stays lower-case
        assert_eq!(camel_case("µm offset"), "mOffset");
    }

    #[test]
    fn test_empty() {
        assert_eq!(camel_case(""), "");
        assert_eq!(camel_case(" - "), "");
    }
}
