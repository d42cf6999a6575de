//! Edit distance with adjacent transpositions (unrestricted Damerau-Levenshtein).

use std::cmp::min;
use std::collections::HashMap;

/// Damerau-Levenshtein distance between `a` and `b`, counted on `char`s.
/// Insertions, deletions, substitutions and adjacent swaps each cost 1, and a
/// swapped pair may be edited again ("ca" -> "abc" is 2).
pub fn damerau_levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    unrestricted(&a_chars, &b_chars, usize::MAX)
}

/// Same as [`damerau_levenshtein`], but gives up as soon as the distance is
/// known to exceed `max`. Returns `None` in that case.
pub fn damerau_levenshtein_within(a: &str, b: &str, max: usize) -> Option<usize> {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.len().abs_diff(b_chars.len()) > max {
        return None;
    }
    let distance = unrestricted(&a_chars, &b_chars, max);
    (distance <= max).then_some(distance)
}

/// Lowrance-Wagner table with a sentinel row and column. Every cell is at
/// least the minimum of the row above, so a row whose minimum exceeds `max`
/// ends the search.
fn unrestricted(a: &[char], b: &[char], max: usize) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let (rows, cols) = (a.len(), b.len());
    let sentinel = rows + cols;
    let mut d = vec![vec![0usize; cols + 2]; rows + 2];
    d[0][0] = sentinel;
    for i in 0..=rows {
        d[i + 1][0] = sentinel;
        d[i + 1][1] = i;
    }
    for j in 0..=cols {
        d[0][j + 1] = sentinel;
        d[1][j + 1] = j;
    }

    // Last row of `a` in which each character was seen.
    let mut last_row: HashMap<char, usize> = HashMap::new();

    for i in 1..=rows {
        let mut last_match_col = 0;
        let mut row_min = d[i + 1][1];
        for j in 1..=cols {
            let k = last_row.get(&b[j - 1]).copied().unwrap_or(0);
            let l = last_match_col;
            let cost = if a[i - 1] == b[j - 1] {
                last_match_col = j;
                0
            } else {
                1
            };
            let best = min(
                min(d[i][j] + cost, d[i + 1][j] + 1),
                min(d[i][j + 1] + 1, d[k][l] + (i - k - 1) + 1 + (j - l - 1)),
            );
            d[i + 1][j + 1] = best;
            row_min = min(row_min, best);
        }
        if row_min > max {
            return row_min;
        }
        last_row.insert(a[i - 1], i);
    }

    d[rows + 1][cols + 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damerau_basic() {
        assert_eq!(damerau_levenshtein("abc", "abc"), 0);
        assert_eq!(damerau_levenshtein("abc", "ab"), 1);
        assert_eq!(damerau_levenshtein("ab", "ba"), 1);
        assert_eq!(damerau_levenshtein("", "abc"), 3);
        assert_eq!(damerau_levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn test_medical_typos() {
        assert_eq!(damerau_levenshtein("hypertention", "hypertension"), 1);
        assert_eq!(damerau_levenshtein("cardiax", "cardiac"), 1);
        assert_eq!(damerau_levenshtein("tachcyardia", "tachycardia"), 1);
        assert_eq!(damerau_levenshtein("abcd", "cdab"), 4);
    }

    #[test]
    fn test_within_bound() {
        assert_eq!(damerau_levenshtein_within("insulin", "insluin", 2), Some(1));
        assert_eq!(damerau_levenshtein_within("insulin", "nsul", 2), None);
        assert_eq!(damerau_levenshtein_within("abcdef", "badcfe", 2), None);
        assert_eq!(damerau_levenshtein_within("ödem", "ödme", 2), Some(1));
    }

    #[test]
    fn test_swapped_pair_can_be_edited_again() {
        assert_eq!(damerau_levenshtein("ca", "abc"), 2);
        assert_eq!(damerau_levenshtein("bt", "tab"), 2);
        assert_eq!(damerau_levenshtein_within("ca", "abc", 2), Some(2));
        assert_eq!(damerau_levenshtein_within("ca", "abc", 1), None);
    }
}
