use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Secret used to sign and verify bearer tokens. Injected into the
    /// TokenService at construction; never read from the environment at
    /// call time.
    pub jwt_secret: String,
    /// Origin allowed by the CORS layer (the dashboard).
    pub dashboard_origin: String,
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let jwt_secret =
        std::env::var("LOGVIEW_JWT_SECRET").unwrap_or_else(|_| "CHANGE_ME_SIGNING_SECRET".into());

    if jwt_secret == "CHANGE_ME_SIGNING_SECRET" {
        let env_mode = std::env::var("LOGVIEW_ENV")
            .or_else(|_| std::env::var("RUST_ENV"))
            .unwrap_or_default();
        if env_mode == "production" {
            anyhow::bail!(
                "LOGVIEW_JWT_SECRET is still the insecure placeholder. \
                 Set a proper signing secret before running in production."
            );
        }
        eprintln!("⚠️  LOGVIEW_JWT_SECRET is not set — using insecure placeholder. Set a real secret for production.");
    }

    Ok(Config {
        port: std::env::var("LOGVIEW_PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .unwrap_or(3000),
        database_url: std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/logview".into()),
        jwt_secret,
        dashboard_origin: std::env::var("LOGVIEW_DASHBOARD_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".into()),
    })
}
