use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

use super::Partition;

/// Integer surrogate key assigned to a record at creation
pub type Index = i64;

/// A value record stored in exactly one partition under its index
///
/// Repositories are generic over this trait: the partition decides where the
/// record lives, `index` is its key, and `name` backs lookup-by-name.
pub trait Record: Serialize + DeserializeOwned + Clone + Debug {
    const PARTITION: Partition;

    fn index(&self) -> Index;

    fn set_index(&mut self, index: Index);

    fn name(&self) -> &str;
}

/// Implement `Record` for a struct with `index: Index` and `name: String` fields
macro_rules! impl_record {
    ($ty:ty, $partition:expr) => {
        impl $crate::model::Record for $ty {
            const PARTITION: $crate::model::Partition = $partition;

            fn index(&self) -> $crate::model::Index {
                self.index
            }

            fn set_index(&mut self, index: $crate::model::Index) {
                self.index = index;
            }

            fn name(&self) -> &str {
                &self.name
            }
        }
    };
}

pub(crate) use impl_record;

/// A record that lists the pledges it has made
pub trait PledgeOwner: Record {
    fn pledges(&self) -> &[Index];

    fn pledges_mut(&mut self) -> &mut Vec<Index>;

    /// Append a pledge index unless it is already listed
    fn add_pledge(&mut self, pledge: Index) {
        let pledges = self.pledges_mut();
        if !pledges.contains(&pledge) {
            pledges.push(pledge);
        }
    }
}

/// Implement `PledgeOwner` for a struct with a `pledges: Vec<Index>` field
macro_rules! impl_pledge_owner {
    ($ty:ty) => {
        impl $crate::model::PledgeOwner for $ty {
            fn pledges(&self) -> &[$crate::model::Index] {
                &self.pledges
            }

            fn pledges_mut(&mut self) -> &mut Vec<$crate::model::Index> {
                &mut self.pledges
            }
        }
    };
}

pub(crate) use impl_pledge_owner;
