#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.backend.base_url, "https://fa-rag-backend.devcustomprojects.com");
        assert!(config.backend.timeout().is_none());
        assert_eq!(config.ui.bind, "0.0.0.0:8501");
        assert_eq!(config.ui.cleanup, CleanupPolicy::Always);
        assert_eq!(config.launcher.public_ui_url, "http://localhost:8501");
        assert_eq!(config.launcher.restart, RestartPolicy::Never);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [backend]
            base_url = "http://localhost:9000"
            timeout_secs = 15

            [ui]
            cleanup = "on_success"

            [launcher]
            restart = "on_failure"
            max_restarts = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:9000");
        assert_eq!(config.backend.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.ui.cleanup, CleanupPolicy::OnSuccess);
        assert_eq!(config.ui.upload_dir, PathBuf::from("."));
        assert_eq!(config.launcher.restart, RestartPolicy::OnFailure);
        assert_eq!(config.launcher.max_restarts, 5);
        assert_eq!(config.launcher.restart_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn test_unknown_cleanup_policy_is_parse_error() {
        let err = Config::from_toml_str("[ui]\ncleanup = \"sometimes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides_win() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            BACKEND_URL_ENV => Some("http://127.0.0.1:7000".to_string()),
            UI_BIND_ENV => Some("127.0.0.1:9501".to_string()),
            _ => None,
        });
        assert_eq!(config.backend.base_url, "http://127.0.0.1:7000");
        assert_eq!(config.ui.bind, "127.0.0.1:9501");
        assert_eq!(config.launcher.bind, "127.0.0.1:8000");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.backend.base_url = "ftp://example.org".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.ui.bind = "localhost".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.ui.max_upload_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_reports_path_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        match Config::from_file(&path) {
            Err(ConfigError::Read { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ragdesk.toml");
        std::fs::write(&path, "[launcher]\nbind = \"0.0.0.0:8080\"\n").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.launcher_addr().unwrap().port(), 8080);
    }
}
