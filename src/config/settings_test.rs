#[cfg(test)]
mod tests {
    use crate::config::settings::{generate_secret, AdminSettings, SessionSettings, Settings};

    #[test]
    fn test_config_loading_uses_defaults() {
        let settings = Settings::new().expect("configuration should load from defaults");

        assert_eq!(settings.server.port, 5000);
        assert!(!settings.database.url.is_empty());
        assert_eq!(settings.admin.per_page, 50);
        assert_eq!(settings.admin.hint_language, "zh");
        assert_eq!(settings.session.remember_days, 365);
        assert!(settings.session.secret.len() >= 32);
    }

    #[test]
    fn test_session_secret_is_random_when_unset() {
        let first = SessionSettings::default();
        let second = SessionSettings::default();
        assert_eq!(first.secret.len(), 64);
        assert_ne!(first.secret, second.secret);
        assert!(generate_secret().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_admin_defaults_match_bootstrap_account() {
        let admin = AdminSettings::default();
        assert_eq!(admin.default_password, "admin");
        assert_eq!(admin.default_lang, "en");

        let session = SessionSettings::default();
        assert!(session.max_age_days < session.remember_days);
    }
}
