// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Value + optional trailing separator wrapper.

use crate::token::Token;

/// One item of a comma- or separator-delimited list.
///
/// `trailing_separator` is present iff a separator immediately followed
/// `value` in the source. On the last item it records a trailing comma.
///
/// With the `serde` feature an item serialises as its value's own fields
/// plus `trailingSeparator` when there is one, so ESTree consumers read
/// `arguments[0].type` as usual.
#[derive(Debug, Clone, PartialEq)]
pub struct Separated<T> {
    pub value: T,
    pub trailing_separator: Option<Token>,
}

impl<T> Separated<T> {
    pub fn new(value: T, trailing_separator: Option<Token>) -> Self {
        Self { value, trailing_separator }
    }

    pub fn bare(value: T) -> Self {
        Self { value, trailing_separator: None }
    }
}

/// Whether the list ends with a trailing separator.
pub fn has_trailing_separator<T>(items: &[Separated<T>]) -> bool {
    items.last().map_or(false, |item| item.trailing_separator.is_some())
}

#[cfg(feature = "serde")]
pub(crate) mod ser {
    use serde::{Serialize, Serializer};

    use super::Separated;
    use crate::token::Token;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Flat<'a, T> {
        #[serde(flatten)]
        value: &'a T,
        #[serde(skip_serializing_if = "Option::is_none")]
        trailing_separator: Option<&'a Token>,
    }

    impl<T: Serialize> Serialize for Separated<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            Flat { value: &self.value, trailing_separator: self.trailing_separator.as_ref() }.serialize(serializer)
        }
    }

    /// Array holes serialise as `null`; their comma stays on the AST only.
    #[allow(clippy::ptr_arg)]
    pub(crate) fn holes<T: Serialize, S: Serializer>(
        items: &Vec<Separated<Option<T>>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(items.iter().map(|item| {
            item.value.as_ref().map(|value| Flat { value, trailing_separator: item.trailing_separator.as_ref() })
        }))
    }
}
