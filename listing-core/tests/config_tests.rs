use listing_core::{CatalogConfig, ConfigError, ListingSource, UiConfig, FAVORITES_KEY};

fn temp_file(tag: &str) -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "listing_config_{}_{}",
        tag,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    dir.join("config.json")
}

#[test]
fn partial_file_keeps_defaults_for_missing_keys() {
    let path = temp_file("partial");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        r#"{"source": {"location": "https://example.com/listings.json"}, "storage": {"dir": "/tmp/listing-favs"}}"#,
    )
    .unwrap();

    let config = CatalogConfig::from_file(&path).unwrap();
    assert!(matches!(config.source.source(), ListingSource::Remote(_)));
    assert_eq!(config.source.request_timeout_seconds, 10);
    assert_eq!(config.ui, UiConfig::default());
    assert!(config
        .favorites_path()
        .ends_with(format!("listing-favs/{FAVORITES_KEY}.json")));

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn saved_config_reads_back() {
    let path = temp_file("save");
    let mut config = CatalogConfig::default();
    config.source.location = "./data/listings.json".into();
    config.ui.card_width = 280.0;
    config.save_to(&path).unwrap();

    assert_eq!(CatalogConfig::from_file(&path).unwrap(), config);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn malformed_file_is_a_parse_error() {
    let path = temp_file("bad");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "source = nope").unwrap();
    assert!(matches!(
        CatalogConfig::from_file(&path),
        Err(ConfigError::Parse(_))
    ));
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn default_source_is_the_bundled_file() {
    let config = CatalogConfig::default();
    assert_eq!(config.source.location, "./airbnb_sf_listings_500.json");
    assert!(matches!(config.source.source(), ListingSource::File(_)));
}
