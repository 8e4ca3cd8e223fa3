use derive_more::Display;

/// Errors raised while turning a raw key value into a [`Key`](crate::Key)
///
/// All of them are fatal for a build: the shape of the tree depends on every
/// key being well-formed, so there is no per-item recovery.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum KeyError {
    /// The raw key is present but has an unusable shape (e.g. a bare number)
    #[display(fmt = "invalid key value: expected {}, found {}", expected, found)]
    InvalidKeyValue {
        expected: &'static str,
        found: &'static str,
    },

    /// A single key component cannot be represented as an atom
    #[display(fmt = "invalid key component at index {}: {}", index, reason)]
    InvalidKeyComponent { index: usize, reason: String },

    /// Normalization produced a key without components
    #[display(fmt = "key must not be empty")]
    EmptyKey,
}

impl KeyError {
    pub(crate) fn component(index: usize, reason: impl Into<String>) -> Self {
        KeyError::InvalidKeyComponent {
            index,
            reason: reason.into(),
        }
    }
}

impl std::error::Error for KeyError {}
