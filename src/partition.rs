use std::ops::Range;

/// Partitions `idx[l..=r]` in place around `split` along `axis`.
///
/// Afterwards every index in `idx[l..b]` refers to a point with
/// `points[i][axis] <= split` and every index in `idx[b..=r]` to one with
/// `points[i][axis] > split`, where `b` is the returned boundary.
/// Entries outside `l..=r` are not touched.
///
/// Membership depends only on the coordinate, so partitioning several index
/// arrays over the same range and split value leaves all of them with the same
/// left and right sets, whatever order each array was in before.
/// A range that is already partitioned is left as it is.
pub fn partition_index(idx: &mut [usize], points: &[[f64; 3]], axis: usize, split: f64, l: usize, r: usize) -> usize {
    if l > r {
        return l;
    }
    let range = &mut idx[l..=r];
    let at = |i: usize| points[i][axis];

    // `j` is exclusive, which keeps both cursors unsigned.
    let mut i = 0;
    let mut j = range.len();
    loop {
        while i < j && at(range[i]) <= split {
            i += 1;
        }
        while i < j && at(range[j - 1]) > split {
            j -= 1;
        }
        if i >= j {
            break;
        }
        range.swap(i, j - 1);
        i += 1;
        j -= 1;
    }
    l + i
}

/// Swaps `value` into position `slot`, searching `idx[range]` for it.
///
/// Returns whether it was found.
pub(crate) fn place_index(idx: &mut [usize], value: usize, range: Range<usize>, slot: usize) -> bool {
    let start = range.start;
    match idx[range].iter().position(|&v| v == value) {
        Some(pos) => {
            idx.swap(start + pos, slot);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(xs: &[f64]) -> Vec<[f64; 3]> {
        xs.iter().map(|&x| [x, -x, 0.0]).collect()
    }

    #[test]
    fn test_partition_basic() {
        let points = line(&[5.0, 1.0, 4.0, 2.0, 3.0]);
        let mut idx: Vec<usize> = (0..5).collect();
        let b = partition_index(&mut idx, &points, 0, 3.0, 0, 4);
        assert_eq!(b, 3);
        assert!(idx[..b].iter().all(|&i| points[i][0] <= 3.0));
        assert!(idx[b..].iter().all(|&i| points[i][0] > 3.0));
    }

    #[test]
    fn test_partition_only_touches_range() {
        let points = line(&[9.0, 8.0, 1.0, 7.0, 0.0, 6.0]);
        let mut idx: Vec<usize> = (0..6).collect();
        let b = partition_index(&mut idx, &points, 0, 5.0, 1, 4);
        assert_eq!(idx[0], 0);
        assert_eq!(idx[5], 5);
        assert_eq!(b, 3);
        let mut left = idx[1..3].to_vec();
        left.sort();
        assert_eq!(left, vec![2, 4]);
    }

    #[test]
    fn test_partition_all_one_side() {
        let points = line(&[1.0, 2.0, 3.0]);
        let mut idx: Vec<usize> = (0..3).collect();
        assert_eq!(partition_index(&mut idx, &points, 0, 10.0, 0, 2), 3);
        assert_eq!(partition_index(&mut idx, &points, 0, -10.0, 0, 2), 0);
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn test_partition_ties_go_left() {
        let points = line(&[2.0, 2.0, 1.0, 2.0, 3.0]);
        let mut idx: Vec<usize> = (0..5).collect();
        let b = partition_index(&mut idx, &points, 0, 2.0, 0, 4);
        assert_eq!(b, 4);
        assert_eq!(idx[4], 4);
    }

    #[test]
    fn test_partition_idempotent() {
        let points = line(&[6.0, 0.5, 3.5, 9.0, 2.0, 7.5, 1.0]);
        let mut idx: Vec<usize> = (0..7).collect();
        let b = partition_index(&mut idx, &points, 0, 3.5, 0, 6);
        let once = idx.clone();
        let b2 = partition_index(&mut idx, &points, 0, 3.5, 0, 6);
        assert_eq!(b, b2);
        assert_eq!(idx, once);
    }

    #[test]
    fn test_partition_three_arrays_agree() {
        let points: Vec<[f64; 3]> = vec![
            [3.0, 1.0, 9.0],
            [1.0, 5.0, 2.0],
            [4.0, 2.0, 6.0],
            [0.0, 8.0, 1.0],
            [2.0, 0.0, 5.0],
        ];
        let mut idx_x = vec![3, 1, 4, 0, 2];
        let mut idx_y = vec![4, 0, 2, 1, 3];
        let mut idx_z = vec![3, 1, 4, 2, 0];
        let bx = partition_index(&mut idx_x, &points, 1, 2.0, 0, 4);
        let by = partition_index(&mut idx_y, &points, 1, 2.0, 0, 4);
        let bz = partition_index(&mut idx_z, &points, 1, 2.0, 0, 4);
        assert_eq!(bx, by);
        assert_eq!(by, bz);
        let sorted = |v: &[usize]| {
            let mut v = v.to_vec();
            v.sort();
            v
        };
        assert_eq!(sorted(&idx_x[..bx]), sorted(&idx_y[..by]));
        assert_eq!(sorted(&idx_y[..by]), sorted(&idx_z[..bz]));
    }

    #[test]
    fn test_empty_range() {
        let points = line(&[1.0]);
        let mut idx = vec![0];
        assert_eq!(partition_index(&mut idx, &points, 0, 0.0, 1, 0), 1);
    }

    #[test]
    fn test_place_index() {
        let mut idx = vec![4, 2, 7, 1, 9];
        assert!(place_index(&mut idx, 2, 0..4, 3));
        assert_eq!(idx, vec![4, 1, 7, 2, 9]);
        assert!(!place_index(&mut idx, 9, 0..4, 3));
    }
}
