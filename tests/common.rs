use std::path::Path;

use photoshare::config::parse_config;
use photoshare::state::AppState;
use photoshare::store::create_store;

pub const ANN: &str = r#"{"id": 1, "name": "ann", "isAdmin": false, "loggedIn": true}"#;
pub const ANONYMOUS: &str = r#"{"loggedIn": false}"#;

/// Build application state the way the binary does, from a YAML document
/// pointing at `base_url` and storing the token in `store_path`.
pub fn build_state(base_url: &str, store_path: &Path) -> AppState {
    let yaml = format!(
        r#"
version: "1.0.0"
api:
  base_url: "{}"
  page_size: 2
store:
  type: file
  path: "{}"
logging:
  level: debug
"#,
        base_url,
        store_path.display()
    );
    let config = parse_config(&yaml).expect("test config should parse");
    let store = create_store(&config.store);
    AppState::new(config, store).expect("state should build")
}

pub fn photos_json(ids: &[i64]) -> String {
    let photos: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "title": format!("photo {}", id),
                "ownerId": 1,
                "ownerName": "ann",
                "tags": [],
                "votes": 0,
                "perms": {"vote": true, "edit": false, "delete": false}
            })
        })
        .collect();
    serde_json::Value::Array(photos).to_string()
}
