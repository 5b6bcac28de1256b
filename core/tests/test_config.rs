#[cfg(test)]
mod tests {
    use std::io::Write;

    use qrgrid_core::codec::EcLevel;
    use qrgrid_core::config::{ConfigError, DuplicatePolicy, GapPolicy, LayoutConfig, TransferConfig};

    #[test]
    fn defaults_match_the_documented_protocol() {
        let config = TransferConfig::default();
        assert_eq!(config.chunk_size, 1000);
        assert_eq!(config.version_cap, 40);
        assert_eq!(config.ec_level, EcLevel::L);
        assert_eq!(config.layout, LayoutConfig { spacing: 20, margin: 0 });
        assert_eq!(config.duplicate_policy, DuplicatePolicy::LastWins);
        assert_eq!(config.gap_policy, GapPolicy::Reject);
        assert!(config.text_bom);
        assert!(!config.visual_debug);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_json_object_is_the_default() {
        assert_eq!(TransferConfig::from_json_str("{}").unwrap(), TransferConfig::default());
    }

    #[test]
    fn json_overrides_selected_fields() {
        let config = TransferConfig::from_json_str(
            r#"{
                "chunk_size": 500,
                "cols": 4,
                "ec_level": "H",
                "layout": { "margin": 8 },
                "duplicate_policy": "first_wins",
                "gap_policy": "allow",
                "text_bom": false
            }"#,
        )
        .unwrap();

        assert_eq!(config.chunk_size, 500);
        assert_eq!(config.cols, Some(4));
        assert_eq!(config.rows, None);
        assert_eq!(config.ec_level, EcLevel::H);
        assert_eq!(config.layout, LayoutConfig { spacing: 20, margin: 8 });
        assert_eq!(config.duplicate_policy, DuplicatePolicy::FirstWins);
        assert_eq!(config.gap_policy, GapPolicy::Allow);
        assert!(!config.text_bom);
    }

    #[test]
    fn validation_rejects_bad_values() {
        assert!(matches!(
            TransferConfig::from_json_str(r#"{"chunk_size": 0}"#),
            Err(ConfigError::ZeroChunkSize)
        ));
        assert!(matches!(
            TransferConfig::from_json_str(r#"{"rows": 0}"#),
            Err(ConfigError::ZeroDimension { axis: "rows" })
        ));
        assert!(matches!(
            TransferConfig::from_json_str(r#"{"version_cap": 41}"#),
            Err(ConfigError::VersionCap { got: 41, max: 40 })
        ));
        assert!(matches!(
            TransferConfig::from_json_str(r#"{"workers": 0}"#),
            Err(ConfigError::ZeroWorkers)
        ));
        assert!(matches!(
            TransferConfig::from_json_str("not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"chunk_size": 321, "workers": 2}}"#).unwrap();

        let config = TransferConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.chunk_size, 321);
        assert_eq!(config.workers, Some(2));
    }

    #[test]
    fn ec_level_from_wire_byte() {
        assert_eq!(EcLevel::try_from(2u8).unwrap(), EcLevel::Q);
        assert!(EcLevel::try_from(4u8).is_err());
        assert_eq!(EcLevel::H.to_string(), "H");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            TransferConfig::from_json_file(dir.path().join("absent.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
