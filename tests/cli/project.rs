use anyhow::Result;
use serde_json::json;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_project_extracts_every_source_file() -> Result<()> {
    let test = CliTest::flutter_project()?;
    test.write_file("lib/main.dart", "Text('Welcome'),\n")?;
    test.write_file("lib/pages/settings.dart", "Text('Dark mode'),\nText('Welcome'),\n")?;
    test.write_file("lib/models/user.g.dart", "Text('Generated'),\n")?;
    test.write_file("test/widget_test.dart", "Text('Test only'),\n")?;

    let output = test.project_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("lib/main.dart")?, "Text(l10n.welcome),\n");
    assert_eq!(
        test.read_file("lib/pages/settings.dart")?,
        "Text(l10n.darkMode),\nText(l10n.welcome),\n"
    );
    assert_eq!(
        test.read_file("lib/models/user.g.dart")?,
        "Text('Generated'),\n"
    );
    assert_eq!(
        test.read_file("test/widget_test.dart")?,
        "Text('Test only'),\n"
    );
    assert_eq!(
        test.read_json("lib/l10n/app_en.arb")?,
        json!({"welcome": "Welcome", "darkMode": "Dark mode"})
    );
    assert!(stdout(&output).contains("Extracted 3 keys into 2 resource files"));
    assert!(stderr(&output).contains("[2/2]"));

    Ok(())
}

#[test]
fn test_project_resource_dir_override() -> Result<()> {
    let test = CliTest::flutter_project()?;
    test.write_file("assets/i18n/app_en.arb", "{}")?;
    test.write_file("lib/main.dart", "Text('Welcome'),\n")?;

    let output = test
        .project_command()
        .args(["--resource-dir", "assets/i18n"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_json("assets/i18n/app_en.arb")?,
        json!({"welcome": "Welcome"})
    );
    assert_eq!(test.read_file("lib/l10n/app_en.arb")?, "{}");

    Ok(())
}

#[test]
fn test_project_without_sources() -> Result<()> {
    let test = CliTest::flutter_project()?;

    let output = test.project_command().output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Nothing to extract"));

    Ok(())
}

#[test]
fn test_project_missing_config_uses_defaults() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("pubspec.yaml", "name: demo\n")?;
    test.write_file("lib/l10n/app_en.arb", "{}")?;
    test.write_file("lib/main.dart", "Text('Welcome'),\n")?;

    let output = test
        .project_command()
        .args(["--yes", "--no-translate", "--no-generate"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("l10n.yaml not found, using defaults"));
    assert_eq!(
        test.read_file("lib/main.dart")?,
        "Text(AppLocalizations.of(context)!.welcome),\n"
    );

    Ok(())
}
