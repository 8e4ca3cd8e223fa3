use derive_more::Display;
use key_tree::KeyError;

/// Errors that abort a menu build
///
/// There is no partial result: the first error stops the run.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MenuError {
    /// A configuration value failed validation
    #[display(fmt = "invalid options: {}", _0)]
    InvalidOptions(String),

    /// An item's key could not be normalized
    #[display(fmt = "invalid key in {}: {}", path, error)]
    Key { path: String, error: KeyError },

    /// A custom key reader returned something other than a key or a skip
    #[display(fmt = "key reader contract violation in {}: {}", path, reason)]
    CustomReaderContractViolation { path: String, reason: String },
}

impl MenuError {
    pub(crate) fn options(message: impl Into<String>) -> Self {
        MenuError::InvalidOptions(message.into())
    }
}

impl std::error::Error for MenuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MenuError::Key { error, .. } => Some(error),
            _ => None,
        }
    }
}
