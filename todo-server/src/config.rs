use anyhow::Context;

pub const DEFAULT_PORT: u16 = 2022;

pub struct Config {
    pub port: u16,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match std::env::var("SERVER_PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("invalid SERVER_PORT: {raw}"))?,
            Err(_) => DEFAULT_PORT,
        };

        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => default_database_url()?,
        };

        Ok(Config { port, database_url })
    }
}

fn default_database_url() -> anyhow::Result<String> {
    let state_dir = dirs::state_dir()
        .or_else(dirs::config_dir)
        .or_else(|| dirs::home_dir().map(|h| h.join(".local/state")))
        .ok_or_else(|| anyhow::anyhow!("Could not find state directory"))?;

    let db_path = state_dir.join("todo").join("data");
    std::fs::create_dir_all(&db_path)?;

    let db_file = db_path.join("todo.db");
    Ok(format!("sqlite:{}?mode=rwc", db_file.display()))
}
