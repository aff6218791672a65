use anyhow::{Context, Result};
use serde_json::json;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Created l10n.yaml"));

    let content = test.read_file("l10n.yaml")?;
    let parsed: serde_yaml::Value =
        serde_yaml::from_str(&content).context("Config should be valid YAML")?;
    assert_eq!(parsed["arb-dir"].as_str(), Some("lib/l10n"));
    assert_eq!(parsed["template-arb-file"].as_str(), Some("app_en.arb"));
    assert_eq!(parsed["translate"].as_bool(), Some(true));
    assert_eq!(parsed["auto-name-key"].as_str(), Some("ask"));

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("l10n.yaml", "arb-dir: res\n")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("l10n.yaml already exists"));
    assert_eq!(test.read_file("l10n.yaml")?, "arb-dir: res\n");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("lib/l10n/app_en.arb", "{}")?;
    test.write_file("lib/main.dart", "Text('Hello'),\n")?;

    let output = test
        .file_command()
        .args(["lib/main.dart", "--yes", "--no-translate", "--no-generate"])
        .output()?;

    assert!(
        output.status.success(),
        "file command should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert_eq!(
        test.read_file("lib/main.dart")?,
        "Text(AppLocalizations.of(context)!.hello),\n"
    );
    assert_eq!(test.read_json("lib/l10n/app_en.arb")?, json!({"hello": "Hello"}));

    Ok(())
}
