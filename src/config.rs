use std::{env, time::Duration};

/// Process configuration, read from the environment exactly once in `main`
/// and handed to the services by value. Nothing else reads env vars.
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub admin_token: String,
    pub page_size: i64,
    pub submission_quota: usize,
    pub submission_window: Duration,
    pub cloudinary: Option<CloudinaryConfig>,
}

#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub upload_preset: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let cloudinary = match (
            env::var("CLOUDINARY_CLOUD_NAME"),
            env::var("CLOUDINARY_UPLOAD_PRESET"),
        ) {
            (Ok(cloud_name), Ok(upload_preset)) => Some(CloudinaryConfig {
                cloud_name,
                upload_preset,
            }),
            _ => None,
        };
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: parse_or("PORT", 3001),
            admin_token: env::var("ADMIN_TOKEN").expect("ADMIN_TOKEN must be set"),
            page_size: parse_or("PAGE_SIZE", 20),
            submission_quota: parse_or("SUBMISSION_QUOTA", 20),
            submission_window: Duration::from_secs(parse_or("SUBMISSION_WINDOW_SECS", 900)),
            cloudinary,
        }
    }
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
impl AppConfig {
    pub fn for_tests() -> Self {
        Self {
            database_url: String::from("sqlite::memory:"),
            port: 0,
            admin_token: String::from("test-admin-token"),
            page_size: 20,
            submission_quota: 20,
            submission_window: Duration::from_secs(900),
            cloudinary: None,
        }
    }
}
