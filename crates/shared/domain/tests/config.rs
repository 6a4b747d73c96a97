use pokedex_domain::config::{
    ApiConfig, DatabaseConfig, LoggingConfig, PaginationConfig, ServerConfig, StorageConfig,
};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 3000);
    assert!(server.ssl.is_none());

    let db = DatabaseConfig::default();
    assert_eq!(db.url, "mem://");
    assert_eq!(db.namespace, "pokedex");
    assert_eq!(db.database, "core");
    assert!(db.credentials.is_none());

    assert_eq!(StorageConfig::default().static_dir, std::path::PathBuf::from("public"));
    assert_eq!(PaginationConfig::default().default_limit, 10);

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert!(logging.path.is_none());
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "database": {
            "url": "ws://localhost:8000",
            "namespace": "n",
            "database": "d",
            "credentials": { "username": "admin", "password": "secret" }
        },
        "storage": { "static_dir": "/srv/public" },
        "pagination": { "default_limit": 25 },
        "logging": { "level": "debug", "json": true }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.database.namespace, "n");
    assert_eq!(cfg.database.credentials.as_ref().map(|c| c.username.as_str()), Some("admin"));
    assert_eq!(cfg.storage.static_dir, std::path::PathBuf::from("/srv/public"));
    assert_eq!(cfg.pagination.default_limit, 25);
    assert!(cfg.logging.json);
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let cfg: ApiConfig = serde_json::from_value(json!({ "server": { "port": 9000 } }))
        .expect("partial config deserialize");
    assert_eq!(cfg.server.port, 9000);
    assert_eq!(cfg.database.url, "mem://");
    assert_eq!(cfg.pagination.default_limit, 10);
}

#[test]
fn deref_mut_copies_on_write() {
    let original = ApiConfig::default();
    let mut changed = original.clone();
    changed.server.port = 4000;

    assert_eq!(original.server.port, 3000);
    assert_eq!(changed.server.port, 4000);
}
