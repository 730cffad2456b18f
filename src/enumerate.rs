//! Cross products of configuration axes.
//!
//! Each axis is an ordered list of options; an option may itself be a group of options,
//! which expands in place. Every combination of one option per axis gets a dense id by
//! mixed-radix encoding with the last axis varying fastest:
//!
//! ```text
//! id = sum_i index_i * (size_(i+1) * ... * size_(n-1))
//! ```
//!
//! so ids run over `0..total` and decode back to their combination without a search.
use crate::error::FftError;

/// One option of an axis, or a nested group of options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AxisEntry<V> {
    Value(V),
    Group(Vec<AxisEntry<V>>),
}

impl<V> From<V> for AxisEntry<V> {
    fn from(value: V) -> Self {
        AxisEntry::Value(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Axis<V> {
    entries: Vec<AxisEntry<V>>,
}

impl<V: Clone> Axis<V> {
    pub fn new(entries: Vec<AxisEntry<V>>) -> Self {
        Self { entries }
    }

    pub fn values(values: impl IntoIterator<Item = V>) -> Self {
        Self {
            entries: values.into_iter().map(AxisEntry::Value).collect(),
        }
    }

    /// The options of this axis in order, with groups expanded.
    pub fn flatten(&self) -> Vec<V> {
        fn walk<V: Clone>(entries: &[AxisEntry<V>], out: &mut Vec<V>) {
            for entry in entries {
                match entry {
                    AxisEntry::Value(value) => out.push(value.clone()),
                    AxisEntry::Group(group) => walk(group, out),
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.entries, &mut out);
        out
    }

    pub fn len(&self) -> usize {
        self.flatten().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn map<U: Clone>(&self, f: impl Fn(&V) -> U) -> Axis<U> {
        fn map_entries<V, U>(entries: &[AxisEntry<V>], f: &impl Fn(&V) -> U) -> Vec<AxisEntry<U>> {
            entries
                .iter()
                .map(|entry| match entry {
                    AxisEntry::Value(value) => AxisEntry::Value(f(value)),
                    AxisEntry::Group(group) => AxisEntry::Group(map_entries(group, f)),
                })
                .collect()
        }
        Axis {
            entries: map_entries(&self.entries, &f),
        }
    }
}

impl Axis<usize> {
    /// `base^from, base^(from + 1), ..., base^to` as one group.
    ///
    /// Powers that overflow `usize` are left out.
    pub fn powers(base: usize, from: u32, to: u32) -> Self {
        let group = (from..=to)
            .map_while(|exp| base.checked_pow(exp))
            .map(AxisEntry::Value)
            .collect();
        Self {
            entries: vec![AxisEntry::Group(group)],
        }
    }

    /// Concatenates the options of two axes.
    pub fn chain(mut self, other: Axis<usize>) -> Self {
        self.entries.extend(other.entries);
        self
    }
}

/// The flattened axes of a cross product, with id encoding and decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enumeration<V> {
    axes: Vec<Vec<V>>,
}

impl<V: Clone> Enumeration<V> {
    pub fn new(axes: &[Axis<V>]) -> Self {
        Self {
            axes: axes.iter().map(Axis::flatten).collect(),
        }
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.axes.iter().map(Vec::len).collect()
    }

    /// Number of combinations. A cross product without axes has exactly one, the empty
    /// combination.
    pub fn len(&self) -> usize {
        self.axes.iter().map(Vec::len).product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The id of the combination picking option `indices[i]` on axis `i`.
    pub fn id_of(&self, indices: &[usize]) -> Option<usize> {
        if indices.len() != self.axes.len() {
            return None;
        }
        indices
            .iter()
            .zip(self.axes.iter())
            .try_fold(0, |id, (&index, axis)| {
                (index < axis.len()).then(|| id * axis.len() + index)
            })
    }

    /// The option index on every axis for `id`.
    ///
    /// # Errors
    ///
    /// [`FftError::InvalidConfigurationId`] if `id` is not below [`Enumeration::len`].
    pub fn indices_of(&self, id: usize) -> Result<Vec<usize>, FftError> {
        let count = self.len();
        if id >= count {
            return Err(FftError::InvalidConfigurationId { id, count });
        }
        let mut rest = id;
        let mut indices = vec![0; self.axes.len()];
        for (index, axis) in indices.iter_mut().zip(self.axes.iter()).rev() {
            *index = rest % axis.len();
            rest /= axis.len();
        }
        Ok(indices)
    }

    /// The combination with id `id`.
    ///
    /// # Errors
    ///
    /// [`FftError::InvalidConfigurationId`] if `id` is out of range.
    pub fn decode(&self, id: usize) -> Result<Vec<V>, FftError> {
        Ok(self
            .indices_of(id)?
            .into_iter()
            .zip(self.axes.iter())
            .map(|(index, axis)| axis[index].clone())
            .collect())
    }

    /// Every combination with its id, in increasing id order.
    pub fn iter(&self) -> Combinations<'_, V> {
        Combinations {
            enumeration: self,
            counter: vec![0; self.axes.len()],
            next_id: 0,
            total: self.len(),
        }
    }
}

/// Odometer over the combinations of an [`Enumeration`].
pub struct Combinations<'a, V> {
    enumeration: &'a Enumeration<V>,
    counter: Vec<usize>,
    next_id: usize,
    total: usize,
}

impl<V: Clone> Iterator for Combinations<'_, V> {
    type Item = (Vec<V>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_id >= self.total {
            return None;
        }
        let axes = &self.enumeration.axes;
        let combination = self
            .counter
            .iter()
            .zip(axes.iter())
            .map(|(&index, axis)| axis[index].clone())
            .collect();
        let id = self.next_id;

        // advance, last axis fastest
        for (digit, axis) in self.counter.iter_mut().zip(axes.iter()).rev() {
            *digit += 1;
            if *digit < axis.len() {
                break;
            }
            *digit = 0;
        }
        self.next_id += 1;

        Some((combination, id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total - self.next_id;
        (left, Some(left))
    }
}

/// Every combination of one option per axis, with its id.
pub fn enumerate<V: Clone>(axes: &[Axis<V>]) -> Vec<(Vec<V>, usize)> {
    Enumeration::new(axes).iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_by_two_by_two_is_a_bijection() {
        let axes = [
            Axis::values([10, 20, 30]),
            Axis::values([1, -1]),
            Axis::values([32, 64]),
        ];
        let combinations = enumerate(&axes);
        assert_eq!(combinations.len(), 12);

        let mut ids: Vec<usize> = combinations.iter().map(|(_, id)| *id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..12).collect::<Vec<_>>());

        let enumeration = Enumeration::new(&axes);
        for (combination, id) in &combinations {
            assert_eq!(&enumeration.decode(*id).unwrap(), combination);
        }
        assert_eq!(combinations[0], (vec![10, 1, 32], 0));
        assert_eq!(combinations[1], (vec![10, 1, 64], 1));
        assert_eq!(combinations[11], (vec![30, -1, 64], 11));
    }

    #[test]
    fn ids_follow_the_mixed_radix_formula() {
        let enumeration = Enumeration::new(&[
            Axis::values(['a', 'b', 'c']),
            Axis::values(['x', 'y']),
            Axis::values(['p', 'q']),
        ]);
        assert_eq!(enumeration.sizes(), vec![3, 2, 2]);
        assert_eq!(enumeration.id_of(&[2, 1, 0]), Some(2 * 4 + 2));
        assert_eq!(enumeration.indices_of(10).unwrap(), vec![2, 1, 0]);
        assert_eq!(enumeration.id_of(&[3, 0, 0]), None);
        assert_eq!(enumeration.id_of(&[0, 0]), None);
    }

    #[test]
    fn groups_expand_in_place() {
        let axis = Axis::new(vec![
            AxisEntry::Value(3),
            AxisEntry::Group(vec![
                AxisEntry::Value(4),
                AxisEntry::Group(vec![AxisEntry::Value(8), AxisEntry::Value(16)]),
            ]),
            AxisEntry::Value(5),
        ]);
        assert_eq!(axis.flatten(), vec![3, 4, 8, 16, 5]);
        assert_eq!(axis.map(|v| v * 2).flatten(), vec![6, 8, 16, 32, 10]);
        assert_eq!(enumerate(&[axis]).len(), 5);
    }

    #[test]
    fn power_axes() {
        assert_eq!(Axis::powers(2, 1, 4).flatten(), vec![2, 4, 8, 16]);
        assert_eq!(
            Axis::powers(3, 0, 2).chain(Axis::powers(5, 1, 1)).flatten(),
            vec![1, 3, 9, 5]
        );
        assert_eq!(Axis::powers(2, 63, 70).len(), 1);
    }

    #[test]
    fn out_of_range_ids_are_rejected() {
        let enumeration = Enumeration::new(&[Axis::values([1, 2]), Axis::values([3])]);
        assert_eq!(
            enumeration.decode(2),
            Err(FftError::InvalidConfigurationId { id: 2, count: 2 })
        );
    }

    #[test]
    fn degenerate_products() {
        let none: [Axis<u8>; 0] = [];
        assert_eq!(enumerate(&none), vec![(vec![], 0)]);
        let empty = [Axis::values([1, 2]), Axis::values(Vec::<i32>::new())];
        assert!(enumerate(&empty).is_empty());
        assert!(Enumeration::new(&empty).is_empty());
    }
}
