use kdpack::{Array, ArrayError, BitArray};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_bits(rng: &mut StdRng, len: usize) -> BitArray {
    BitArray::generate(len, || rng.gen_bool(0.4))
}

#[test]
fn test_end_to_end_scenario() {
    let original = BitArray::from([true, false, true, true, false]);

    assert_eq!(original.sorted(), BitArray::from([false, false, true, true, true]));
    assert_eq!(original.sum(), 3);
    assert_eq!(original.removed(true), BitArray::from([false, false]));

    let mut a = original.clone();
    assert_eq!(a.remove_at(10), Err(ArrayError::RemoveOutOfRange { index: 10, len: 5 }));
    assert_eq!(a, original);
}

#[test]
fn test_sorted_is_sorted() {
    let mut rng = StdRng::seed_from_u64(1);
    for len in [0, 1, 2, 63, 64, 65, 200] {
        let a = random_bits(&mut rng, len);
        let s = a.sorted();
        assert!(s.is_sorted());
        assert_eq!(s.len(), len);
        assert_eq!(s.count_ones(), a.count_ones());

        let mut b = a.clone();
        b.sort();
        assert_eq!(b, s);

        let r = a.rsorted();
        assert_eq!(r.count_ones(), a.count_ones());
        assert!(r.iter().skip(a.count_ones()).all(|x| !x));
    }
}

#[test]
fn test_in_place_ordering() {
    let mut rng = StdRng::seed_from_u64(5);
    for len in [0, 1, 64, 130] {
        let a = random_bits(&mut rng, len);
        let ones = a.count_ones();

        let mut r = a.clone();
        r.rsort();
        assert_eq!(r, a.rsorted());
        assert!(r.iter().take(ones).all(|x| x));

        let mut u = a.clone();
        u.sort_and_unique();
        assert_eq!(u, a.sorted_and_uniqued());

        let mut by = a.clone();
        by.stable_sort_by(|x, y| y.cmp(x));
        assert_eq!(by, r);
    }

    let mut mixed = BitArray::from([true, false, true, false, false]);
    mixed.sort_and_unique();
    assert_eq!(mixed, BitArray::from([false, true]));
}

#[test]
fn test_sort_matches_vec_sort() {
    let mut rng = StdRng::seed_from_u64(2);
    let a = random_bits(&mut rng, 150);
    let mut v: Vec<bool> = a.iter().collect();
    v.sort();
    assert_eq!(a.sorted(), BitArray::from(v.clone()));
    assert_eq!(a.stable_sorted(), BitArray::from(v.clone()));
    v.reverse();
    assert_eq!(a.sorted_by(|x, y| y.cmp(x)), BitArray::from(v));
}

#[test]
fn test_sorted_and_uniqued() {
    assert!(BitArray::new().sorted_and_uniqued().is_empty());
    assert_eq!(BitArray::from([true, true]).sorted_and_uniqued(), BitArray::from([true]));
    assert_eq!(BitArray::from([false]).sorted_and_uniqued(), BitArray::from([false]));
    assert_eq!(BitArray::from([true, false, true]).sorted_and_uniqued(), BitArray::from([false, true]));

    let mut rng = StdRng::seed_from_u64(3);
    for len in [0, 1, 5, 100] {
        let a = random_bits(&mut rng, len);
        let u = a.sorted_and_uniqued();
        assert!(u.len() <= 2);
        assert_eq!(u.contains(true), a.contains(true));
        assert_eq!(u.contains(false), a.contains(false));
    }
}

#[test]
fn test_stable_uniqued_keeps_first_occurrence() {
    assert_eq!(BitArray::from([true, false, true]).stable_uniqued(), BitArray::from([true, false]));
    assert_eq!(BitArray::from([false, false, true]).stable_uniqued(), BitArray::from([false, true]));
    assert_eq!(BitArray::from([true, true]).stable_uniqued(), BitArray::from([true]));
    let mut a = BitArray::from([false, true, false]);
    a.stable_unique();
    assert_eq!(a, BitArray::from([false, true]));
}

#[test]
fn test_sum_of_uniform_arrays() {
    for n in [0, 1, 63, 64, 65, 1000] {
        assert_eq!(BitArray::from_elem(n, true).sum(), n);
        assert_eq!(BitArray::from_elem(n, false).sum(), 0);
    }
}

#[test]
fn test_replace_degenerates_to_fill() {
    let a = BitArray::from([true, false, false, true]);
    assert_eq!(a.replaced(false, true), BitArray::from_elem(4, true));
    assert_eq!(a.replaced(true, false), BitArray::from_elem(4, false));
    assert_eq!(a.replaced(true, true), a);

    let mut b = a.clone();
    b.replace_if(|x| x, false);
    assert_eq!(b, BitArray::from_elem(4, false));
}

#[test]
fn test_removed_keeps_the_other_value() {
    let a = BitArray::from([true, false, true, true, false]);
    assert_eq!(a.removed(false), BitArray::from_elem(3, true));
    let mut b = a.clone();
    b.remove(true);
    assert_eq!(b, BitArray::from_elem(2, false));
    assert_eq!(a.removed_if(|x| !x), BitArray::from_elem(3, true));
}

#[test]
fn test_checked_access() {
    let a = BitArray::from([true, false]);
    assert_eq!(a.at(1), Ok(false));
    assert_eq!(a.at(2), Err(ArrayError::OutOfRange { index: 2, len: 2 }));
    assert_eq!(a.removed_at(2), Err(ArrayError::RemoveOutOfRange { index: 2, len: 2 }));
    assert_eq!(a.removed_at(0), Ok(BitArray::from([false])));
    assert!(a.fetch(7, true));
    assert!(a[0]);
}

#[test]
#[should_panic(expected = "index out of range")]
fn test_unchecked_index_panics() {
    let a = BitArray::from([true]);
    let _ = a[1];
}

#[test]
fn test_values_at_is_all_or_nothing() {
    let a = BitArray::from([true, false, true]);
    assert_eq!(a.values_at(&[2, 1, 1]), Ok(BitArray::from([true, false, false])));
    assert_eq!(a.values_at(&[0, 3, 1]), Err(ArrayError::ValuesAtOutOfRange { index: 3, len: 3 }));
}

#[test]
fn test_clear_and_release() {
    let mut a = BitArray::from_elem(1000, true);
    a.clear();
    assert!(a.is_empty());
    assert!(a.capacity() >= 1000);
    a.release();
    assert!(a.is_empty());
    assert_eq!(a.capacity(), 0);
}

#[test]
fn test_push_pop_both_ends() {
    let mut a = BitArray::new();
    a.push_back(true);
    a.push_front(false);
    a.push_back(false);
    assert_eq!(a.to_string(), "[false, true, false]");
    assert_eq!(a.pop_front(), Some(false));
    assert_eq!(a.pop_back(), Some(false));
    assert_eq!(a.pop_back(), Some(true));
    assert_eq!(a.pop_back(), None);
    assert_eq!(a.pop_front(), None);
}

#[test]
fn test_resize_and_assign() {
    let mut a = BitArray::from([true]);
    a.resize(130, true);
    assert_eq!(a.count_ones(), 130);
    a.resize(3, false);
    assert_eq!(a, BitArray::from_elem(3, true));
    a.resize(5, false);
    assert_eq!(a, BitArray::from([true, true, true, false, false]));
    a.assign(2, false);
    assert_eq!(a, BitArray::from([false, false]));
}

#[test]
fn test_rotate_and_reverse() {
    let a = BitArray::from([true, false, false, true, true]);
    assert_eq!(a.rotated(1), BitArray::from([false, false, true, true, true]));
    assert_eq!(a.rotated(-1), BitArray::from([true, true, false, false, true]));
    assert_eq!(a.reversed(), BitArray::from([true, true, false, false, true]));
    let mut b = a.clone();
    b.reverse().reverse();
    assert_eq!(b, a);
}

#[test]
fn test_partition_is_stable() {
    let mut a = BitArray::from([false, true, false, true]);
    let split = a.stable_partition(|x| x);
    assert_eq!(split, 2);
    assert_eq!(a, BitArray::from([true, true, false, false]));
}

#[test]
fn test_partition_splits_at_the_count() {
    let mut a = BitArray::from([false, true, false, true, true, false]);
    let split = a.partition(|x| !x);
    assert_eq!(split, 3);
    assert!(a.iter().take(split).all(|x| !x));
    assert!(a.iter().skip(split).all(|x| x));

    let mut none = BitArray::from_elem(70, true);
    assert_eq!(none.partition(|x| !x), 0);
    assert_eq!(none, BitArray::from_elem(70, true));
}

#[test]
fn test_selection() {
    let a = BitArray::from([true, true, false, true, false, false, true]);
    assert_eq!(a.take(2), BitArray::from([true, true]));
    assert_eq!(a.take(100), a);
    assert_eq!(a.take_while(|x| x), BitArray::from([true, true]));
    assert_eq!(a.drop_while(|x| x), a.slice(2));
    assert_eq!(a.slice_len(3, 2), BitArray::from([true, false]));
    assert!(a.slice(7).is_empty());

    let chunks = a.chunk(3);
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[2], BitArray::from([true]));
    assert!(a.chunk(0).is_empty());

    let groups = a.in_groups(3);
    assert_eq!(groups.map(|g| g.len()), Array::from([3, 2, 2]));
    assert!(a.in_groups(0).is_empty());
}

#[test]
fn test_map_produces_generic_array() {
    let a = BitArray::from([true, false]);
    let names: Array<&str> = a.map(|x| if x { "yes" } else { "no" });
    assert_eq!(names.to_string(), r#"["yes", "no"]"#);
    assert_eq!(a.map(u8::from), Array::from([1u8, 0]));
    assert_eq!(a.reduce(|acc, x| acc + usize::from(x), 10), 11);
    assert_eq!(a.reduce1(|x, y| x && y), Ok(false));
    assert_eq!(BitArray::new().reduce1(|x, y| x || y), Err(ArrayError::Empty { operation: "reduce1" }));
}

#[test]
fn test_each_family() {
    let a = BitArray::from([true, false, true]);
    let mut seen = Vec::new();
    a.each_index(|i, x| seen.push((i, x)));
    assert_eq!(seen, vec![(0, true), (1, false), (2, true)]);

    let mut signed = Vec::new();
    a.each_sindex(|i, _| signed.push(i));
    assert_eq!(signed, vec![0isize, 1, 2]);

    let mut rev = Vec::new();
    a.each_reverse(|x| rev.push(x));
    assert_eq!(rev, vec![true, false, true]);
}

#[test]
fn test_random_operations_with_seeded_rng() {
    let mut rng = StdRng::seed_from_u64(99);
    let a = BitArray::from([true, false, false, false]);
    let s = a.shuffled_with(&mut rng);
    assert_eq!(s.count_ones(), 1);
    assert_eq!(s.len(), 4);

    assert!(a.choice_with(&mut rng).is_ok());
    assert_eq!(BitArray::new().choice(), Err(ArrayError::Empty { operation: "choice" }));

    let picked = a.choice_multiple_with(3, &mut rng);
    assert_eq!(picked.len(), 3);
    assert!(picked.count_ones() <= 1);
    assert_eq!(a.choice_multiple(10).len(), 4);
}

#[test]
fn test_formatting() {
    let a = BitArray::from([false, true, true]);
    assert_eq!(a.to_string(), "[false, true, true]");
    assert_eq!(format!("{:?}", a), "[false, true, true]");
    assert_eq!(a.join("; ", "<", ">"), "<false; true; true>");
    assert_eq!(BitArray::new().to_string(), "[]");
}

#[test]
fn test_conversions() {
    let v = vec![true, false, true];
    let a = BitArray::from(v.clone());
    assert_eq!(Vec::<bool>::from(a.clone()), v);
    let generic: Array<bool> = a.clone().into();
    assert_eq!(generic, Array::from(v.clone()));
    assert_eq!(BitArray::from(generic), a);
    assert_eq!(BitArray::from(&v[..]), a);
    assert_eq!(a.iter().rev().collect::<Vec<_>>(), vec![true, false, true]);
    assert_eq!(a.clone().into_iter().count(), 3);
}

#[test]
fn test_packing_is_dense() {
    let a = BitArray::from_elem(1024, true);
    assert_eq!(a.size_bytes(), 128);
}
