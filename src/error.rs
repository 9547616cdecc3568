/// Outcomes of [`MTree::insert`](crate::MTree::insert) and
/// [`MTree::remove`](crate::MTree::remove) that leave the tree unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The inserted value is already stored in the tree.
    DuplicateValue,
    /// The removed value is not stored in the tree.
    ValueNotFound,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateValue => write!(f, "duplicate value insertion is not allowed"),
            Self::ValueNotFound => write!(f, "value not found in the tree"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display() {
        assert_eq!(
            Error::DuplicateValue.to_string(),
            "duplicate value insertion is not allowed"
        );
        assert_eq!(Error::ValueNotFound.to_string(), "value not found in the tree");
        assert_ne!(Error::DuplicateValue, Error::ValueNotFound);
    }
}
