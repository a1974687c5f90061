/// Index of `target` in the ascending slice `arr`, or `None` if absent.
///
/// With duplicates any matching index may come back.
pub fn binary_search<T: Ord>(arr: &[T], target: &T) -> Option<usize> {
    let (mut l, mut r) = (0, arr.len());
    while l < r {
        let m = l + (r - l) / 2;
        match arr[m].cmp(target) {
            std::cmp::Ordering::Equal => return Some(m),
            std::cmp::Ordering::Less => l = m + 1,
            std::cmp::Ordering::Greater => r = m,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_unique_targets_exactly() {
        let arr = [1, 4, 9, 16, 25, 36];
        for (i, x) in arr.iter().enumerate() {
            assert_eq!(binary_search(&arr, x), Some(i));
        }
    }

    #[test]
    fn absent_targets_and_empty_slices() {
        assert_eq!(binary_search(&[1, 3, 5], &4), None);
        assert_eq!(binary_search(&[1, 3, 5], &0), None);
        assert_eq!(binary_search(&[1, 3, 5], &6), None);
        assert_eq!(binary_search::<i32>(&[], &1), None);
    }

    #[test]
    fn duplicates_return_some_matching_index() {
        let arr = [1, 2, 3, 4, 99, 99, 99];
        let i = binary_search(&arr, &99).unwrap();
        assert_eq!(arr[i], 99);
    }

    #[test]
    fn works_on_strings() {
        let words = ["ant", "bee", "cat", "dog"];
        assert_eq!(binary_search(&words, &"cat"), Some(2));
    }
}
