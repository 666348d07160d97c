use kdpack::{Array, ArrayError, BitArray, Sequence};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_construction() {
    assert_eq!(Array::from_elem(3, 7), Array::from([7, 7, 7]));
    assert_eq!(Array::from_fn(4, |i| i * i), Array::from([0, 1, 4, 9]));
    let mut n = 0;
    assert_eq!(Array::generate(3, || { n += 2; n }), Array::from([2, 4, 6]));
    let collected: Array<i32> = (1..=3).collect();
    assert_eq!(collected.into_vec(), vec![1, 2, 3]);
}

#[test]
fn test_ordering_family() {
    let a = Array::from([3, 1, 2, 3, 1]);
    assert_eq!(a.sorted(), Array::from([1, 1, 2, 3, 3]));
    assert_eq!(a.rsorted(), Array::from([3, 3, 2, 1, 1]));
    assert_eq!(a.sorted_and_uniqued(), Array::from([1, 2, 3]));
    assert_eq!(a.stable_uniqued(), Array::from([3, 1, 2]));
    assert_eq!(Array::from([1, 1, 2, 1]).uniqued_consecutive(), Array::from([1, 2, 1]));
    assert!(a.sorted().is_sorted());
    assert!(!a.is_sorted());

    let words = Array::from(["bb", "a", "ccc", "dd"]);
    assert_eq!(words.sorted_by(|x, y| x.len().cmp(&y.len())).front(), Some(&"a"));
    let mut stable = words.clone();
    stable.stable_sort_by(|x, y| x.len().cmp(&y.len()));
    assert_eq!(stable, Array::from(["a", "bb", "dd", "ccc"]));
}

#[test]
fn test_removal_family() {
    let mut a = Array::from([1, 2, 3, 2, 1]);
    assert_eq!(a.removed(&2), Array::from([1, 3, 1]));
    assert_eq!(a.removed_if(|&x| x > 1), Array::from([1, 1]));
    assert_eq!(a.remove_at(1), Ok(2));
    assert_eq!(a.remove_at(9), Err(ArrayError::RemoveOutOfRange { index: 9, len: 4 }));
    a.keep_if(|&x| x != 3);
    assert_eq!(a, Array::from([1, 2, 1]));
    a.remove(&1);
    assert_eq!(a, Array::from([2]));
}

#[test]
fn test_replace_family() {
    let a = Array::from([1, 2, 1]);
    assert_eq!(a.replaced(&1, 5), Array::from([5, 2, 5]));
    assert_eq!(a.replaced_if(|&x| x == 2, 0), Array::from([1, 0, 1]));
}

#[test]
fn test_checked_access() {
    let a = Array::from(["x", "y"]);
    assert_eq!(a.at(1), Ok(&"y"));
    assert_eq!(a.at(2), Err(ArrayError::OutOfRange { index: 2, len: 2 }));
    assert_eq!(a.values_at(&[1, 0]), Ok(Array::from(["y", "x"])));
    assert_eq!(a.values_at(&[5]), Err(ArrayError::ValuesAtOutOfRange { index: 5, len: 2 }));
    assert_eq!(a.fetch(3, "z"), "z");
}

#[test]
fn test_higher_order() {
    let a = Array::from([1, 2, 3, 4]);
    assert_eq!(a.map(|x| x * 10), Array::from([10, 20, 30, 40]));
    assert_eq!(a.filter(|&x| x % 2 == 0), Array::from([2, 4]));
    assert_eq!(a.filter_map(|&x| (x > 2).then_some(x)), Array::from([3, 4]));
    assert_eq!(a.reduce(|acc, &x| acc * x, 1), 24);
    assert_eq!(a.reduce1(|acc, &x| acc.max(x)), Ok(4));
    assert_eq!(a.sum(), 10);
    assert_eq!(a.count_if(|&x| x > 1), 3);
    assert!(a.all(|&x| x > 0) && a.any(|&x| x == 4) && a.none(|&x| x > 4));
}

#[test]
fn test_shuffle_is_a_permutation() {
    let mut rng = StdRng::seed_from_u64(4);
    let a = Array::from_fn(100, |i| i);
    let s = a.shuffled_with(&mut rng);
    assert_eq!(s.sorted(), a);
    let picked = a.choice_multiple_with(10, &mut rng);
    assert_eq!(picked.len(), 10);
    assert!(picked.is_sorted(), "Samples keep their original order");
    assert!(a.choice_with(&mut rng).is_ok());
    assert_eq!(Array::<u8>::new().choice(), Err(ArrayError::Empty { operation: "choice" }));
}

#[test]
fn test_chunk_and_groups() {
    let a = Array::from_fn(5, |i| i);
    assert_eq!(a.chunk(2), Array::from([Array::from([0, 1]), Array::from([2, 3]), Array::from([4])]));
    let groups = a.in_groups(7);
    assert_eq!(groups.len(), 7);
    assert_eq!(groups.count_if(|g| g.is_empty()), 2);
}

/// Applies the same sequence of operations through the shared trait.
fn exercise<S: Sequence<Item = bool>>(s: &mut S) -> Vec<Option<bool>> {
    s.push_back(true);
    s.push_back(false);
    s.push_front(false);
    s.insert(1, true);
    let mut out = vec![s.first_element(), s.last_element(), s.element(1)];
    out.push(s.remove_at(0).ok());
    out.push(s.remove_at(10).ok());
    out.push(s.pop_front());
    out.push(s.pop_back());
    out.push(s.checked_at(0).ok());
    out.push(s.checked_at(5).ok());
    s.clear();
    out.push(s.first_element());
    out
}

#[test]
fn test_packed_and_generic_agree() {
    let mut generic: Array<bool> = Array::new();
    let mut packed = BitArray::new();
    assert_eq!(exercise(&mut generic), exercise(&mut packed));

    let mut rng = StdRng::seed_from_u64(8);
    let values: Vec<bool> = (0..300).map(|_| rng.gen_bool(0.5)).collect();
    let g = Array::from(values.clone());
    let p = BitArray::from(values);

    assert_eq!(Array::from(p.sorted()), g.sorted());
    assert_eq!(Array::from(p.rsorted()), g.rsorted());
    assert_eq!(Array::from(p.sorted_and_uniqued()), g.sorted_and_uniqued());
    assert_eq!(Array::from(p.stable_uniqued()), g.stable_uniqued());
    assert_eq!(Array::from(p.uniqued_consecutive()), g.uniqued_consecutive());
    assert_eq!(Array::from(p.reversed()), g.reversed());
    assert_eq!(Array::from(p.rotated(37)), g.rotated(37));
    assert_eq!(Array::from(p.rotated(-5)), g.rotated(-5));
    assert_eq!(Array::from(p.removed(true)), g.removed(&true));
    assert_eq!(Array::from(p.replaced(false, true)), g.replaced(&false, true));
    assert_eq!(Array::from(p.removed_at(150).unwrap()), g.removed_at(150).unwrap());
    assert_eq!(Array::from(p.slice_len(10, 70)), g.slice_len(10, 70));
    assert_eq!(p.count(true), g.count(&true));
    assert_eq!(p.sum(), g.count(&true));
    assert_eq!(p.to_string(), g.to_string());

    let mut gp = g.clone();
    let mut pp = p.clone();
    assert_eq!(pp.stable_partition(|x| !x), gp.stable_partition(|&x| !x));
    assert_eq!(Array::from(pp), gp);

    let mut gi = g.clone();
    let mut pi = p.clone();
    for (i, v) in [(0, true), (64, false), (128, true), (303, false)] {
        gi.insert(i, v);
        pi.insert(i, v);
    }
    assert_eq!(Array::from(pi), gi);
}
