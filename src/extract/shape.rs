//! Word shape predicates shared by the built-in extractors

/// All cased characters are uppercase and there is at least one
pub fn is_upper(word: &str) -> bool {
    let mut cased = false;
    for c in word.chars() {
        if c.is_lowercase() {
            return false;
        }
        cased |= c.is_uppercase();
    }
    cased
}

/// Every run of letters starts uppercase and continues lowercase
pub fn is_title(word: &str) -> bool {
    let mut cased = false;
    let mut prev_cased = false;
    for c in word.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            cased = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
        } else {
            prev_cased = false;
        }
    }
    cased
}

pub fn is_digit(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_numeric())
}

/// Last `n` characters of `word`, or all of it when shorter
pub fn suffix(word: &str, n: usize) -> &str {
    match word.char_indices().rev().nth(n.saturating_sub(1)) {
        Some((i, _)) if n > 0 => &word[i..],
        _ if n == 0 => "",
        _ => word,
    }
}

/// First `n` characters of `s`, or all of it when shorter
pub fn prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_predicates() {
        assert!(is_upper("EFE"));
        assert!(is_upper("U.S."));
        assert!(!is_upper("Efe"));
        assert!(!is_upper("1984"));

        assert!(is_title("Melbourne"));
        assert!(is_title("Saint-Étienne"));
        assert!(!is_title("McDonald"));
        assert!(!is_title("melbourne"));
        assert!(!is_title("--"));
    }

    #[test]
    fn test_digits_and_affixes() {
        assert!(is_digit("2002"));
        assert!(!is_digit("20.02"));
        assert!(!is_digit(""));

        assert_eq!(suffix("Australia", 3), "lia");
        assert_eq!(suffix("año", 2), "ño");
        assert_eq!(suffix("de", 3), "de");
        assert_eq!(prefix("NC", 2), "NC");
        assert_eq!(prefix("0010110", 4), "0010");
        assert_eq!(prefix("N", 2), "N");
    }
}
