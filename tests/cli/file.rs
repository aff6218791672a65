use anyhow::Result;
use serde_json::json;

use crate::{CliTest, stderr, stdout};

const HOME_PAGE: &str = r#"Widget build(BuildContext context) {
  return Column(children: [
    Text('Welcome back'),
    // Text('Old title'),
    Text("Hello $name"),
    Text('Log out', style: danger),
  ]);
}
"#;

#[test]
fn test_file_extracts_all_literals() -> Result<()> {
    let test = CliTest::flutter_project()?;
    test.write_file("lib/home.dart", HOME_PAGE)?;

    let output = test.file_command().arg("lib/home.dart").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("lib/home.dart")?,
        r#"Widget build(BuildContext context) {
  return Column(children: [
    Text(l10n.welcomeBack),
    // Text('Old title'),
    Text("Hello $name"),
    Text(l10n.logOut, style: danger),
  ]);
}
"#
    );
    assert_eq!(
        test.read_json("lib/l10n/app_fr.arb")?,
        json!({"logOut": "Log out", "welcomeBack": "Welcome back"})
    );
    assert!(stdout(&output).contains("Extracted 2 keys into 2 resource files"));

    Ok(())
}

#[test]
fn test_file_keeps_existing_entries() -> Result<()> {
    let test = CliTest::flutter_project()?;
    test.write_file(
        "lib/l10n/app_en.arb",
        r#"{
  "@@locale": "en",
  "title": "Title",
  "@title": {
    "description": "Page title"
  }
}"#,
    )?;
    test.write_file("lib/home.dart", "Text('Log out'),\n")?;

    let output = test.file_command().arg("lib/home.dart").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("lib/l10n/app_en.arb")?,
        r#"{
  "@@locale": "en",
  "title": "Title",
  "@title": {
    "description": "Page title"
  },
  "logOut": "Log out"
}
"#
    );

    Ok(())
}

#[test]
fn test_file_import_line() -> Result<()> {
    let test = CliTest::flutter_project()?;
    test.write_file(
        "l10n.yaml",
        &format!(
            "{}import-line: \"import 'package:demo/l10n.dart';\"\n",
            crate::OFFLINE_CONFIG
        ),
    )?;
    test.write_file("lib/home.dart", "Text('Log out'),\n")?;

    test.file_command().arg("lib/home.dart").output()?;

    assert_eq!(
        test.read_file("lib/home.dart")?,
        "import 'package:demo/l10n.dart';\nText(l10n.logOut),\n"
    );

    Ok(())
}

#[test]
fn test_file_without_literals() -> Result<()> {
    let test = CliTest::flutter_project()?;
    test.write_file("lib/home.dart", "Text(title),\n")?;

    let output = test.file_command().arg("lib/home.dart").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Nothing to extract"));
    assert_eq!(test.read_file("lib/l10n/app_en.arb")?, "{}");

    Ok(())
}

#[test]
fn test_file_corrupt_resource_is_partial_failure() -> Result<()> {
    let test = CliTest::flutter_project()?;
    test.write_file("lib/l10n/app_fr.arb", "{ broken")?;
    test.write_file("lib/home.dart", "Text('Log out'),\n")?;

    let output = test.file_command().arg("lib/home.dart").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("app_fr.arb"));
    assert_eq!(test.read_file("lib/l10n/app_fr.arb")?, "{ broken");
    assert_eq!(test.read_json("lib/l10n/app_en.arb")?, json!({"logOut": "Log out"}));

    Ok(())
}

#[test]
fn test_file_verbose_shows_locations() -> Result<()> {
    let test = CliTest::flutter_project()?;
    test.write_file("lib/home.dart", HOME_PAGE)?;

    let output = test
        .file_command()
        .args(["lib/home.dart", "--verbose"])
        .output()?;

    let out = stdout(&output);
    assert!(out.contains("extracted: \"Welcome back\" as welcomeBack"));
    assert!(out.contains("--> lib/home.dart:3:10"));
    assert!(out.contains("app_fr.arb (2 added, 0 updated)"));

    Ok(())
}

#[test]
fn test_file_ask_mode_reads_keys_from_stdin() -> Result<()> {
    use std::io::Write;
    use std::process::Stdio;

    let test = CliTest::flutter_project()?;
    test.write_file(
        "l10n.yaml",
        &crate::OFFLINE_CONFIG.replace("auto-name-key: true", "auto-name-key: ask"),
    )?;
    test.write_file("lib/home.dart", "Text('Save'),\nText('Cancel'),\n")?;

    let mut child = test
        .file_command()
        .arg("lib/home.dart")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    // Literals are asked back to front: accept "cancel", rename "Save".
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(b"\nsaveButton\n")?;
    let output = child.wait_with_output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("lib/home.dart")?,
        "Text(l10n.saveButton),\nText(l10n.cancel),\n"
    );

    Ok(())
}
