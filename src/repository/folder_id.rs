use std::{fmt::Display, num::NonZeroU32};

use serde::{Deserialize, Serialize};

/// Stable identity of a folder on the account.
///
/// The platform addresses folders by a small positive number. That number is
/// the only thing that links a catalog entry to a remote folder, titles may
/// change freely.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
#[repr(transparent)]
pub struct FolderId(NonZeroU32);

impl Display for FolderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<u32> for FolderId {
    type Error = &'static str;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or("folder id should not be zero")
    }
}

impl TryFrom<&u32> for FolderId {
    type Error = <Self as TryFrom<u32>>::Error;

    fn try_from(value: &u32) -> Result<Self, Self::Error> {
        Self::try_from(*value)
    }
}

impl From<FolderId> for u32 {
    fn from(value: FolderId) -> Self {
        value.0.into()
    }
}

#[cfg(test)]
mod tests {
    use assertables::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn test_from_and_into_u32_are_consistent() {
        let expected = 7u32;
        let id = assert_ok!(FolderId::try_from(expected));
        let id_ref = assert_ok!(FolderId::try_from(&expected));
        assert_eq!(id, id_ref);
        assert_eq!(expected, id.into());
    }

    #[rstest]
    fn test_zero_is_rejected() {
        assert_err!(FolderId::try_from(0));
    }

    #[rstest]
    fn test_folder_id_displays_as_number() {
        let id = assert_ok!(FolderId::try_from(3));
        assert_eq!("3", id.to_string());
    }

    #[rstest]
    fn test_folder_ids_order_numerically() {
        let mut ids = [9, 2, 10, 1].map(|n| assert_ok!(FolderId::try_from(n)));
        ids.sort_unstable();
        assert_eq!(
            vec![1, 2, 9, 10],
            ids.into_iter().map(u32::from).collect::<Vec<_>>()
        );
    }
}
