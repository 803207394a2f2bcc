/// The signed-in user, as far as rendering cares.
///
/// Passed explicitly to the renderer; nothing reads it from ambient state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub avatar_url: Option<String>,
}

impl Identity {
    #[must_use]
    pub fn with_avatar(avatar_url: impl Into<String>) -> Self {
        Self { avatar_url: Some(avatar_url.into()) }
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }
}
