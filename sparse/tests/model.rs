use proptest::prelude::*;
use slotted_sparse::SparseArray;

const CAPACITY: usize = 16;

#[derive(Debug, Clone)]
enum Op {
    Emplace(usize, u32),
    Erase(usize),
    Insert(u32),
    EraseIf(u32),
    Clear,
    Grow(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..CAPACITY, any::<u32>()).prop_map(|(index, value)| Op::Emplace(index, value)),
        3 => (0..CAPACITY + 2).prop_map(Op::Erase),
        2 => any::<u32>().prop_map(Op::Insert),
        1 => (2..5u32).prop_map(Op::EraseIf),
        1 => Just(Op::Clear),
        1 => (0..4usize).prop_map(Op::Grow),
    ]
}

/// A slot vector plus the expected live order, checked against the array
/// after every operation
struct Model {
    slots: Vec<Option<u32>>,
    order: Vec<usize>,
}

impl Model {
    fn apply(&mut self, array: &mut SparseArray<u32>, op: &Op) {
        match *op {
            Op::Emplace(index, value) => {
                if self.slots[index].replace(value).is_none() {
                    self.order.push(index);
                }
                array.emplace_at(index, value);
            }
            Op::Erase(index) => {
                let expected = self.slots.get_mut(index).and_then(Option::take).is_some();
                self.order.retain(|&live| live != index);
                assert_eq!(array.erase_at(index), expected);
            }
            Op::Insert(value) => {
                let expected = self.slots.iter().position(Option::is_none);
                if let Some(index) = expected {
                    self.slots[index] = Some(value);
                    self.order.push(index);
                }
                assert_eq!(array.insert(value).ok(), expected);
            }
            Op::EraseIf(divisor) => {
                let slots = &mut self.slots;
                let before = self.order.len();
                self.order.retain(|&index| {
                    let erase = slots[index].map_or(false, |value| value % divisor == 0);
                    if erase {
                        slots[index] = None;
                    }
                    !erase
                });
                assert_eq!(array.erase_if(|value| *value % divisor == 0), before - self.order.len());
            }
            Op::Clear => {
                self.slots.iter_mut().for_each(|slot| *slot = None);
                self.order.clear();
                array.clear();
            }
            Op::Grow(additional) => {
                let capacity = self.slots.len() + additional;
                self.slots.resize(capacity, None);
                array.resize(capacity);
            }
        }
    }

    fn check(&self, array: &SparseArray<u32>) {
        assert_eq!(array.capacity(), self.slots.len());
        assert_eq!(array.len(), self.order.len());
        assert_eq!(array.indices().collect::<Vec<_>>(), self.order);

        for (index, slot) in self.slots.iter().enumerate() {
            assert_eq!(array.get(index), slot.as_ref());
        }

        let expected_empty = self.slots.iter().position(Option::is_none);
        assert_eq!(array.next_empty_index(), expected_empty);
        assert_eq!(expected_empty.is_none(), array.len() == array.capacity());
    }
}

proptest! {
    #[test]
    fn liveness_matches_model(ops in proptest::collection::vec(arb_op(), 1..64)) {
        let mut array = SparseArray::with_capacity(CAPACITY);
        let mut model = Model {
            slots: vec![None; CAPACITY],
            order: Vec::new(),
        };

        for op in &ops {
            model.apply(&mut array, op);
            model.check(&array);
        }
    }

    #[test]
    fn erase_if_removes_exactly_the_matches(values in proptest::collection::vec(proptest::option::of(0..100u32), 0..32)) {
        let mut array = SparseArray::with_capacity(values.len());
        for (index, value) in values.iter().enumerate().rev() {
            if let Some(value) = *value {
                array.emplace_at(index, value);
            }
        }

        let survivors = array
            .entries()
            .filter(|(_, value)| **value % 2 == 1)
            .map(|(index, _)| index)
            .collect::<Vec<_>>();
        let matches = array.len() - survivors.len();

        prop_assert_eq!(array.erase_if(|value| *value % 2 == 0), matches);
        prop_assert_eq!(array.indices().collect::<Vec<_>>(), survivors);
        prop_assert!(array.iter().all(|value| value % 2 == 1));
    }
}
