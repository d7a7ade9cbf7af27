//! Generic CRUD and lookup-by-name for any `Record`

use openclimate_core::codec;
use openclimate_core::errors::{ExError, ExErrorKind, OcError};
use openclimate_core::{Index, Record, Region};
use std::marker::PhantomData;

use crate::errors::Result;
use crate::kv::KeyedStore;

/// Typed view of one partition
///
/// Values handed out are copies; mutating one has no effect until it is
/// passed back to `save`.
pub struct Repository<'s, T: Record> {
    store: &'s KeyedStore,
    _kind: PhantomData<fn() -> T>,
}

impl<T: Record> Clone for Repository<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Record> Copy for Repository<'_, T> {}

impl<'s, T: Record> Repository<'s, T> {
    pub fn new(store: &'s KeyedStore) -> Self {
        Self {
            store,
            _kind: PhantomData,
        }
    }

    /// Assign the next index to `record`, persist it and return it
    ///
    /// Whatever index the caller set is replaced.
    pub fn create(&self, mut record: T) -> Result<T> {
        let index = self.store.insert_next(T::PARTITION, |index| {
            record.set_index(index);
            Ok(codec::encode(&record)?)
        })?;
        record.set_index(index);
        Ok(record)
    }

    /// Overwrite the stored record at `record.index()` (last writer wins)
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the record was never given an index.
    pub fn save(&self, record: &T) -> Result<()> {
        if record.index() < 1 {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("save")
                .with_partition(T::PARTITION)
                .with_message("record has no index; use create for new records"));
        }
        self.store.save(T::PARTITION, record.index(), record)
    }

    /// # Errors
    ///
    /// `NotFound` if absent, `DataCorruption` if the bytes are not a `T`.
    pub fn retrieve_by_index(&self, index: Index) -> Result<T> {
        let bytes = self.store.get(T::PARTITION, index)?;
        Ok(codec::decode(T::PARTITION, index, &bytes)?)
    }

    /// First record, in store order, whose name equals `name` exactly
    pub fn retrieve_by_name(&self, name: &str) -> Result<T> {
        self.find_first(|record| record.name() == name)?
            .ok_or_else(|| {
                ExError::from(OcError::NameNotFound {
                    partition: T::PARTITION,
                    name: name.to_string(),
                })
            })
    }

    /// First record, in store order, matching `predicate`
    pub fn find_first<P>(&self, predicate: P) -> Result<Option<T>>
    where
        P: Fn(&T) -> bool,
    {
        Ok(self.retrieve_all()?.into_iter().find(|record| predicate(record)))
    }

    /// Every record of the partition in store order
    ///
    /// One undecodable record fails the whole call.
    pub fn retrieve_all(&self) -> Result<Vec<T>> {
        self.store.get_all_decoded(T::PARTITION)
    }

    /// Remove the record; its index is not handed to anyone else
    /// (under the monotonic policy)
    pub fn delete(&self, index: Index) -> Result<()> {
        self.store.delete(T::PARTITION, index)
    }

    pub fn count(&self) -> Result<usize> {
        self.store.count(T::PARTITION)
    }
}

impl Repository<'_, Region> {
    /// Compound lookup: first region with this name in this country
    pub fn retrieve_by_name_and_country(&self, name: &str, country: &str) -> Result<Region> {
        self.find_first(|region| region.name == name && region.belongs_to(country))?
            .ok_or_else(|| {
                ExError::from(OcError::NameNotFound {
                    partition: Region::PARTITION,
                    name: format!("{} ({})", name, country),
                })
            })
    }
}
