use std::collections::HashMap;
use std::hash::Hash;

/// Descending rank of each value within its group, "min" tie rule: tied
/// values share the lowest rank of the tie, and the next distinct value skips
/// ahead (`[10, 10, 7]` -> `[1, 1, 3]`).
///
/// `keys[i]` is the group of `values[i]`; the result is in input order.
pub fn min_rank_desc<K>(keys: &[K], values: &[f64]) -> Vec<u32>
where
    K: Eq + Hash,
{
    debug_assert_eq!(keys.len(), values.len());

    let mut groups: HashMap<&K, Vec<f64>> = HashMap::new();
    for (key, &value) in keys.iter().zip(values) {
        groups.entry(key).or_default().push(value);
    }

    keys.iter()
        .zip(values)
        .map(|(key, &value)| {
            let better = groups[key].iter().filter(|&&other| other > value).count();
            better as u32 + 1
        })
        .collect()
}
