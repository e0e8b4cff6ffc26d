//! Lowest common ancestor of two root-to-node paths.

/// Number of leading names the two paths share.
pub fn common_prefix_len<A, B>(a: &[A], b: &[B]) -> usize
where
    A: PartialEq<B>,
{
    a.iter().zip(b).take_while(|(x, y)| *x == *y).count()
}

/// Index of the deepest shared ancestor, or `None` if the roots already differ.
pub fn lowest_common_ancestor_index<A, B>(a: &[A], b: &[B]) -> Option<usize>
where
    A: PartialEq<B>,
{
    common_prefix_len(a, b).checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_root() {
        let english = ["Indo-European", "Germanic", "English"];
        let italian = ["Indo-European", "Romance", "Italian"];
        assert_eq!(lowest_common_ancestor_index(&english, &italian), Some(0));
    }

    #[test]
    fn test_disjoint_roots() {
        assert_eq!(lowest_common_ancestor_index(&["Uralic", "Finnish"], &["Turkic", "Turkish"]), None);
    }

    #[test]
    fn test_prefix_and_identical() {
        let group = ["Indo-European", "Germanic"];
        let english = ["Indo-European", "Germanic", "English"];
        assert_eq!(lowest_common_ancestor_index(&group, &english), Some(1));
        assert_eq!(lowest_common_ancestor_index(&english, &english), Some(2));
        assert_eq!(common_prefix_len::<&str, &str>(&[], &english), 0);
    }

    #[test]
    fn test_stops_at_first_difference() {
        // Later equal positions must not extend the prefix.
        let a = ["Root", "A", "Same"];
        let b = ["Root", "B", "Same"];
        assert_eq!(lowest_common_ancestor_index(&a, &b), Some(0));
    }
}
