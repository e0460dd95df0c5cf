pub type PackResult<T> = Result<T, PackError>;

#[derive(thiserror::Error, Debug)]
pub enum PackError {
    /// The sheet cannot hold the remaining sprites. Fatal for the whole
    /// `generate_atlas` call; no partial atlas is returned.
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PackError {
    pub fn capacity_exceeded(msg: impl Into<String>) -> Self {
        Self::CapacityExceeded(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            PackError::capacity_exceeded("x")
                .to_string()
                .contains("capacity exceeded:")
        );
        assert!(PackError::decode("x").to_string().contains("decode error:"));
        assert!(
            PackError::validation("x")
                .to_string()
                .contains("validation error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = PackError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
