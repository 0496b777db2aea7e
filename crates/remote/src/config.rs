/// Connection settings for the managed backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend project, e.g. `https://abc.backend.example`.
    pub base_url: String,
    /// Publishable API key sent with every request.
    pub anon_key: String,
}

impl BackendConfig {
    /// Load backend settings from environment variables.
    ///
    /// | Env Var           | Required |
    /// |-------------------|----------|
    /// | `BACKEND_URL`     | **yes**  |
    /// | `BACKEND_ANON_KEY`| **yes**  |
    ///
    /// # Panics
    ///
    /// Panics if either variable is not set or is empty.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("BACKEND_URL").expect("BACKEND_URL must be set in the environment");
        assert!(!base_url.is_empty(), "BACKEND_URL must not be empty");

        let anon_key = std::env::var("BACKEND_ANON_KEY")
            .expect("BACKEND_ANON_KEY must be set in the environment");
        assert!(!anon_key.is_empty(), "BACKEND_ANON_KEY must not be empty");

        Self { base_url, anon_key }
    }

    /// Build settings directly, mainly for tests and tooling.
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: anon_key.into(),
        }
    }
}
