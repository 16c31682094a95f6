//! Key-based grouping into ordered buckets

use super::candidate::Candidate;
use std::collections::HashMap;
use std::hash::Hash;

/// Members sharing one key value, in the order they were supplied
#[derive(Debug, Clone)]
pub struct Bucket<'a, T, K> {
    pub key: K,
    pub members: Vec<Candidate<'a, T>>,
}

impl<T, K> Bucket<'_, T, K> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Lowest ordinal among the members
    pub fn first_ordinal(&self) -> usize {
        self.members
            .iter()
            .map(|c| c.ordinal)
            .min()
            .unwrap_or(usize::MAX)
    }
}

/// Partition `members` by `key`.
///
/// Buckets appear in order of their key's first occurrence; members keep
/// their relative order inside a bucket.
pub fn group_by_key<'a, T, K, F>(members: &[Candidate<'a, T>], key: F) -> Vec<Bucket<'a, T, K>>
where
    K: Eq + Hash + Clone,
    F: Fn(&Candidate<'a, T>) -> K,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut buckets: Vec<Bucket<'a, T, K>> = Vec::new();

    for member in members {
        let k = key(member);
        match positions.get(&k) {
            Some(&position) => buckets[position].members.push(*member),
            None => {
                positions.insert(k.clone(), buckets.len());
                buckets.push(Bucket {
                    key: k,
                    members: vec![*member],
                });
            }
        }
    }
    buckets
}

/// The largest bucket; equal sizes go to the bucket holding the earliest
/// member in input order.
pub fn largest<'a, T, K>(buckets: Vec<Bucket<'a, T, K>>) -> Option<Bucket<'a, T, K>> {
    buckets.into_iter().reduce(|best, bucket| {
        let better = bucket.len() > best.len()
            || (bucket.len() == best.len() && bucket.first_ordinal() < best.first_ordinal());
        if better { bucket } else { best }
    })
}

/// Most frequent key value among `members`, tie-broken like [`largest`]
pub fn majority<'a, T, K, F>(members: &[Candidate<'a, T>], key: F) -> Option<K>
where
    K: Eq + Hash + Clone,
    F: Fn(&Candidate<'a, T>) -> K,
{
    largest(group_by_key(members, key)).map(|bucket| bucket.key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates<'a>(labels: &'a [&'static str]) -> Vec<Candidate<'a, &'static str>> {
        labels
            .iter()
            .enumerate()
            .map(|(ordinal, item)| Candidate {
                ordinal,
                output: ordinal,
                position: 0,
                source: "test",
                item,
            })
            .collect()
    }

    #[test]
    fn test_group_by_key_keeps_first_occurrence_order() {
        let labels = ["VERB", "NOUN", "VERB", "ADJ"];
        let members = candidates(&labels);
        let buckets = group_by_key(&members, |c| *c.item);
        let keys: Vec<&str> = buckets.iter().map(|b| b.key).collect();
        assert_eq!(keys, vec!["VERB", "NOUN", "ADJ"]);
        let ordinals: Vec<usize> = buckets[0].members.iter().map(|c| c.ordinal).collect();
        assert_eq!(ordinals, vec![0, 2]);
    }

    #[test]
    fn test_largest_prefers_size() {
        let labels = ["VERB", "NOUN", "NOUN"];
        let members = candidates(&labels);
        let winner = largest(group_by_key(&members, |c| *c.item)).unwrap();
        assert_eq!(winner.key, "NOUN");
        assert_eq!(winner.len(), 2);
    }

    #[test]
    fn test_largest_tie_goes_to_earliest_member() {
        let labels = ["NOUN", "VERB", "VERB", "NOUN"];
        let mut members = candidates(&labels);
        // present the later bucket first; the earliest ordinal still decides
        members.reverse();
        let winner = largest(group_by_key(&members, |c| *c.item)).unwrap();
        assert_eq!(winner.key, "NOUN");
        assert_eq!(winner.first_ordinal(), 0);
    }

    #[test]
    fn test_majority_and_empty() {
        let labels = ["a", "b", "b"];
        let members = candidates(&labels);
        assert_eq!(majority(&members, |c| *c.item), Some("b"));
        let none: Vec<Candidate<'_, &'static str>> = Vec::new();
        assert_eq!(majority(&none, |c| *c.item), None);
    }
}
