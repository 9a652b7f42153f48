use std::marker::PhantomData;

/// Deduplicating arena: equal values share one id, ids are handed out in insertion order.
#[derive(Debug)]
pub(crate) struct Interner<T, Id>(indexmap::IndexSet<T, fxhash::FxBuildHasher>, PhantomData<Id>);

impl<T, Id> Default for Interner<T, Id> {
    fn default() -> Self {
        Self(Default::default(), PhantomData)
    }
}

impl<T: core::hash::Hash + Eq, Id: Copy + From<usize> + Into<usize>> Interner<T, Id> {
    /// Returns the id of `value`, inserting it if absent. The flag is true when the value is new.
    pub fn get_or_insert_full(&mut self, value: T) -> (Id, bool) {
        let (index, inserted) = self.0.insert_full(value);
        (index.into(), inserted)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn ids(&self) -> impl ExactSizeIterator<Item = Id> {
        (0..self.0.len()).map(Into::into)
    }
}

impl<T, Id: Into<usize>> std::ops::Index<Id> for Interner<T, Id> {
    type Output = T;

    fn index(&self, index: Id) -> &T {
        &self.0[index.into()]
    }
}
