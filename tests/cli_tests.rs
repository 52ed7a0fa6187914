use tetris_fumen::cli::{run_decode, run_encode, CliConfig};

#[test]
fn decode_url_to_json_and_back() {
    let config = CliConfig::default();
    let json = run_decode("https://fumen.zui.jp/?v115@vhAQp", &config).unwrap();

    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v.as_array().map(|a| a.len()), Some(1));
    assert_eq!(v[0]["piece"]["type"], "T");
    assert_eq!(v[0]["piece"]["rotation"], "north");
    assert_eq!(v[0]["piece"]["location"], 0);
    assert_eq!(v[0]["flags"]["lock"], true);
    assert!(v[0]["flags"].get("comment").is_none());
    assert_eq!(v[0]["field"].as_array().map(|rows| rows.len()), Some(24));

    assert_eq!(run_encode(&json, &config).unwrap(), "v115@vhAQp");
}

#[test]
fn pretty_output_is_multiline() {
    let config = CliConfig {
        pretty: true,
        ..CliConfig::default()
    };
    let json = run_decode("v115@vhAQp", &config).unwrap();
    assert!(json.contains('\n'));
}

#[test]
fn encode_applies_filler_config() {
    let json = r#"[
        {"piece": {"type": "T"}, "flags": {"comment": "a long enough comment to wrap"}},
        {"piece": {"type": "I", "rotation": "east", "location": 4}}
    ]"#;
    let config = CliConfig {
        filler_every: Some(5),
        ..CliConfig::default()
    };
    let text = run_encode(json, &config).unwrap();
    assert!(text.starts_with("v115@"));
    assert!(text.contains('?'));

    let plain = run_encode(json, &CliConfig::default()).unwrap();
    assert_eq!(text.replace('?', ""), plain);
}

#[test]
fn errors_carry_context() {
    let config = CliConfig::default();

    let err = run_decode("v110@vhAQp", &config).unwrap_err();
    assert!(format!("{:#}", err).contains("v115@ format tag"));

    let err = run_decode("v115@vhAQ", &config).unwrap_err();
    assert!(format!("{:#}", err).contains("truncated"));

    let err = run_encode(r#"[{"piece": {"type": "X"}}]"#, &config).unwrap_err();
    assert!(format!("{:#}", err).contains("piece.type"));

    assert!(run_encode("not json", &config).is_err());
}
