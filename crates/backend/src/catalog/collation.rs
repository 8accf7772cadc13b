//! Turkish collation for name sorts.
//!
//! Case-insensitive primary strength over the Turkish alphabet (ç after c,
//! ğ after g, ı before i, ö after o, ş after s, ü after u). Characters
//! outside the alphabet compare by code point and sort before letters, so
//! digits lead the way they do under `localeCompare(.., 'tr')`.

use std::cmp::Ordering;

const ALPHABET: [char; 29] = [
    'a', 'b', 'c', 'ç', 'd', 'e', 'f', 'g', 'ğ', 'h', 'ı', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'ö', 'p', 'r', 's', 'ş', 't', 'u', 'ü', 'v', 'y', 'z',
];

/// Lowercase with Turkish casing rules: dotless I stays dotless.
fn fold(c: char) -> char {
    match c {
        'I' => 'ı',
        'İ' => 'i',
        _ => c.to_lowercase().next().unwrap_or(c),
    }
}

fn rank(c: char) -> Option<usize> {
    ALPHABET.iter().position(|&a| a == c)
}

// Non-alphabet characters get group 0 so they sort before letters
fn key(c: char) -> (u8, u32) {
    match rank(c) {
        Some(r) => (1, r as u32),
        None => (0, c as u32),
    }
}

pub fn turkish_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().map(fold);
    let mut right = b.chars().map(fold);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(lc), Some(rc)) => match key(lc).cmp(&key(rc)) {
                Ordering::Equal => continue,
                other => return other,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_sorts_before_c_cedilla() {
        assert_eq!(turkish_cmp("cam", "çadır"), Ordering::Less);
        assert_eq!(turkish_cmp("çadır", "dere"), Ordering::Less);
    }

    #[test]
    fn dotless_i_sorts_before_dotted_i() {
        assert_eq!(turkish_cmp("ısı", "iğne"), Ordering::Less);
    }

    #[test]
    fn case_insensitive_primary_strength() {
        assert_eq!(turkish_cmp("Çadır", "çadır"), Ordering::Equal);
        assert_eq!(turkish_cmp("UYKU TULUMU", "uyku tulumu"), Ordering::Equal);
    }

    #[test]
    fn turkish_upper_i_folds_dotless() {
        assert_eq!(turkish_cmp("IŞIK", "ışık"), Ordering::Equal);
        assert_eq!(turkish_cmp("İP", "ip"), Ordering::Equal);
    }

    #[test]
    fn digits_sort_before_letters() {
        assert_eq!(turkish_cmp("3 Kişilik Çadır", "Ateş Çukuru"), Ordering::Less);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(turkish_cmp("çadır", "çadırlar"), Ordering::Less);
    }
}
