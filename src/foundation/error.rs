pub type TermreelResult<T> = Result<T, TermreelError>;

#[derive(thiserror::Error, Debug)]
pub enum TermreelError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("font error: {0}")]
    Font(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TermreelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            TermreelError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(TermreelError::font("x").to_string().contains("font error:"));
        assert!(
            TermreelError::render("x")
                .to_string()
                .contains("render error:")
        );
        assert!(
            TermreelError::encode("x")
                .to_string()
                .contains("encode error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = TermreelError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
