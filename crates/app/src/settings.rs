//! Handles settings for the application. Configuration is written in
//! `settings.toml`; any key can be overridden with a `FOODGRAM_` environment
//! variable, using `__` between sections (`FOODGRAM_SERVER__PORT=8080`).
use config::{Config, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite { path: String },
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

/// Where the PDF export font lives.
#[derive(Debug, Deserialize)]
pub struct Export {
    pub fonts_dir: String,
    pub font_file: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub export: Export,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::build(
            Config::builder()
                .add_source(File::with_name("settings").required(false))
                .add_source(Environment::with_prefix("FOODGRAM").separator("__")),
        )
    }

    fn build(builder: config::ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder
            .set_default("app.level", "info")?
            .set_default("server.port", 3000)?
            .set_default("server.database.type", "sqlite")?
            .set_default("server.database.path", "foodgram.db")?
            .set_default("export.fonts_dir", "fonts")?
            .set_default("export.font_file", "Roboto-Regular.ttf")?
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Settings {
        Settings::build(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
            .unwrap()
    }

    #[test]
    fn empty_file_uses_defaults() {
        let settings = parse("");
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(
            settings.server.database,
            Database::Sqlite {
                path: "foodgram.db".to_string()
            }
        );
        assert_eq!(settings.export.fonts_dir, "fonts");
        assert_eq!(settings.export.font_file, "Roboto-Regular.ttf");
    }

    #[test]
    fn reads_memory_database_and_font() {
        let settings = parse(
            r#"
            [app]
            level = "debug"

            [server]
            bind = "0.0.0.0"
            port = 8080
            database = { type = "memory" }

            [export]
            fonts_dir = "/usr/share/fonts"
            font_file = "DejaVuSans.ttf"
            "#,
        );
        assert_eq!(settings.app.level, "debug");
        assert_eq!(settings.server.bind.as_deref(), Some("0.0.0.0"));
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.database, Database::Memory);
        assert_eq!(settings.export.font_file, "DejaVuSans.ttf");
    }
}
