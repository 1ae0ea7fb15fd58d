/// Registry service configuration loaded from environment variables.
#[derive(Debug)]
pub struct RegistryConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3100). Env var: `REGISTRY_PORT`.
    pub registry_port: u16,
    /// HS256 signing secret for access and refresh tokens.
    pub jwt_secret: String,
}

impl RegistryConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            registry_port: std::env::var("REGISTRY_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3100),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
        }
    }
}
