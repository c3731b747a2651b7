//! Commands driven by a configuration file on disk.

use std::fs;

use veazzy_cli::commands::{self, codec::EnvelopeOptions};
use veazzy_cli::{CliConfig, CliError};
use veazzy_protocol::CodecRegistry;

#[test]
fn pretty_json_setting_applies_to_decode() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[output]\npretty_json = true\n").unwrap();
    let stanza_path = dir.path().join("stanza.xml");
    fs::write(
        &stanza_path,
        r#"<roomStatus xmlns="http://jitsi.org/jitmeet/roomstatus">0</roomStatus>"#,
    )
    .unwrap();

    let config = CliConfig::load_from(&config_path).unwrap();
    let xml = commands::read_input(Some(stanza_path.as_path())).unwrap();
    let json = commands::codec::decode(&CodecRegistry::with_defaults(), &xml, &config.output).unwrap();

    assert!(json.contains('\n'));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["kind"], "room_status");
    assert_eq!(value["status"], 0);
}

#[test]
fn wrap_iq_setting_applies_to_encode() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[output]\nwrap_iq = true\n").unwrap();

    let config = CliConfig::load_from(&config_path).unwrap();
    let xml = commands::codec::encode(
        r#"{"kind":"blind","do_blind":true}"#,
        &EnvelopeOptions::default(),
        &config.output,
    )
    .unwrap();

    insta::assert_snapshot!(xml, @r#"<iq id="veazzy-1" type="set"><blind xmlns="http://jitsi.org/jitmeet/video">true</blind></iq>"#);
}

#[test]
fn missing_input_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = commands::read_input(Some(dir.path().join("nope.xml").as_path())).unwrap_err();
    assert!(matches!(err, CliError::Io(_)));
}
