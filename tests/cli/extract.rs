use anyhow::Result;
use serde_json::json;

use crate::{CliTest, stderr, stdout};

const LOGIN_PAGE: &str = r#"import 'package:flutter/material.dart';

Widget build(BuildContext context) {
  return ElevatedButton(
    onPressed: submit,
    child: const Text('Sign in'),
  );
}
"#;

#[test]
fn test_extract_at_cursor() -> Result<()> {
    let test = CliTest::flutter_project()?;
    test.write_file("lib/login.dart", LOGIN_PAGE)?;

    let output = test
        .extract_command()
        .args(["lib/login.dart", "--at", "6:24"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(
        test.read_file("lib/login.dart")?
            .contains("child: const Text(l10n.signIn),")
    );
    assert_eq!(test.read_json("lib/l10n/app_en.arb")?, json!({"signIn": "Sign in"}));
    assert_eq!(test.read_json("lib/l10n/app_fr.arb")?, json!({"signIn": "Sign in"}));
    assert!(stdout(&output).contains("Extracted 1 key into 2 resource files"));

    Ok(())
}

#[test]
fn test_extract_with_explicit_key() -> Result<()> {
    let test = CliTest::flutter_project()?;
    test.write_file("lib/login.dart", LOGIN_PAGE)?;

    let output = test
        .extract_command()
        .args(["lib/login.dart", "--at", "6:25", "--key", "loginButton"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(
        test.read_file("lib/login.dart")?
            .contains("Text(l10n.loginButton)")
    );
    assert_eq!(
        test.read_json("lib/l10n/app_en.arb")?,
        json!({"loginButton": "Sign in"})
    );

    Ok(())
}

#[test]
fn test_extract_invalid_key_is_error() -> Result<()> {
    let test = CliTest::flutter_project()?;
    test.write_file("lib/login.dart", LOGIN_PAGE)?;

    let output = test
        .extract_command()
        .args(["lib/login.dart", "--at", "6:25", "--key", "login button"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("not a valid key"));
    assert_eq!(test.read_file("lib/login.dart")?, LOGIN_PAGE);

    Ok(())
}

#[test]
fn test_extract_outside_literal_is_nothing_to_do() -> Result<()> {
    let test = CliTest::flutter_project()?;
    test.write_file("lib/login.dart", LOGIN_PAGE)?;

    let output = test
        .extract_command()
        .args(["lib/login.dart", "--at", "5:5"])
        .output()?;

    assert!(output.status.success());
    assert!(stderr(&output).contains("no string literal at lib/login.dart:5:5"));
    assert!(stdout(&output).contains("Nothing to extract"));
    assert_eq!(test.read_file("lib/login.dart")?, LOGIN_PAGE);
    assert_eq!(test.read_file("lib/l10n/app_en.arb")?, "{}");

    Ok(())
}

#[test]
fn test_extract_position_out_of_range() -> Result<()> {
    let test = CliTest::flutter_project()?;
    test.write_file("lib/login.dart", LOGIN_PAGE)?;

    let output = test
        .extract_command()
        .args(["lib/login.dart", "--at", "40:1"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("lib/login.dart:40:1 is outside"));
    assert_eq!(test.read_file("lib/login.dart")?, LOGIN_PAGE);

    Ok(())
}

#[test]
fn test_extract_escaped_literal_is_skipped() -> Result<()> {
    let test = CliTest::flutter_project()?;
    let source = "final label = Text('it\\'s');\n";
    test.write_file("lib/label.dart", source)?;

    let output = test
        .extract_command()
        .args(["lib/label.dart", "--at", "1:22"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("uses interpolation or escapes, skipped"));
    assert!(stdout(&output).contains("Nothing to extract"));
    assert_eq!(test.read_file("lib/label.dart")?, source);
    assert_eq!(test.read_file("lib/l10n/app_en.arb")?, "{}");

    Ok(())
}

#[test]
fn test_extract_missing_file() -> Result<()> {
    let test = CliTest::flutter_project()?;

    let output = test
        .extract_command()
        .args(["lib/missing.dart", "--at", "1:1"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to read file"));

    Ok(())
}

#[test]
fn test_extract_without_resource_dir() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("l10n.yaml", crate::OFFLINE_CONFIG)?;
    test.write_file("lib/login.dart", LOGIN_PAGE)?;

    let output = test
        .extract_command()
        .args(["lib/login.dart", "--at", "6:25"])
        .output()?;

    // The source edit is committed before the resource directory is read.
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("cannot read resource directory"));
    assert!(test.read_file("lib/login.dart")?.contains("Text(l10n.signIn)"));
    assert!(!test.root().join("lib/l10n").exists());

    Ok(())
}
