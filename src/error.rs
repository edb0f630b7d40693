pub type CorniceResult<T> = Result<T, CorniceError>;

#[derive(thiserror::Error, Debug)]
pub enum CorniceError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("asset error: {0}")]
    Asset(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CorniceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            CorniceError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(CorniceError::asset("x").to_string().contains("asset error:"));
        assert!(
            CorniceError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = CorniceError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
