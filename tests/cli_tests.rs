use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

const PASTA: &str = r#"<html><body>
<div class="panel panel-default">
  <div class="panel-heading">Montag, 03. November</div>
  <div class="panel-body"><table>
    <tr><td><strong>Pasta</strong></td><td><p>3,50</p></td></tr>
  </table></div>
</div>
</body></html>"#;

fn mensa_feed(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mensa-feed"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary runs")
}

fn write_input(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("fhrus.xml");
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_help_exits_zero() {
    let output = mensa_feed(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--year"));
    assert!(stdout.contains("xmllint"));
}

#[test]
fn test_missing_file_argument() {
    let output = mensa_feed(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_feed_on_stdout() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, PASTA);

    let output = mensa_feed(&["--year", "2015", &input]);
    assert!(output.status.success());
    assert!(output.stderr.is_empty());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("<day date='2015-11-03'>"));
    assert!(stdout.contains("<name>Pasta</name>"));
    assert!(stdout.contains("<price role='employee'>5.10</price>"));
}

// what `xmllint --html --format --xmlout` makes of the canteen page
const XMLLINT_PAGE: &str = r#"<?xml version="1.0" standalone="yes"?>
<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.0 Transitional//EN" "http://www.w3.org/TR/REC-html40/loose.dtd">
<html lang="de">
  <head>
    <meta http-equiv="Content-Type" content="text/html; charset=UTF-8"/>
    <title>Speiseplan FH R&#xFC;sselsheim</title>
  </head>
  <body>
    <div class="panel panel-default">
      <div class="panel-heading">Montag, 03. November</div>
      <div class="panel-body">
        <table class="table">
          <tr>
            <td><strong>Pasta</strong><p>mit Tomatensauce</p><img src="veg.png" title="vegetarisch"/></td>
            <td><p>3,50 &#x20AC;</p></td>
          </tr>
        </table>
      </div>
    </div>
  </body>
</html>
"#;

#[test]
fn test_xmllint_output_converts() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, XMLLINT_PAGE);

    let output = mensa_feed(&["--year", "2015", &input]);
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("<day date='2015-11-03'>"));
    assert!(stdout.contains("<name>Pasta</name>"));
    assert!(stdout.contains("<note>mit Tomatensauce</note>"));
    assert!(stdout.contains("<note>vegetarisch</note>"));
    assert!(stdout.contains("<price role='student'>3.50</price>"));
    assert!(stdout.contains("<price role='other'>5.10</price>"));
}

#[test]
fn test_oversized_price_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        &XMLLINT_PAGE.replace("3,50 &#x20AC;", "79228162514264337593543950335,00 &#x20AC;"),
    );

    // ruesselsheim tolerates an unusable price
    let output = mensa_feed(&["--year", "2015", &input]);
    assert!(output.status.success());
    assert!(!String::from_utf8(output.stdout).unwrap().contains("<price "));

    let profile = dir.path().join("strict.toml");
    fs::write(
        &profile,
        r#"
name = "strict"
days = "//div[@class='panel panel-default']"
heading = "normalize-space(string(.//div[@class='panel-heading']))"
rows = ".//div[@class='panel-body']/*/tr"
meal_name = "./td[1]//strong"
prices = "(./td[2]//p)[1]"
price_style = "student_base"
price_policy = "required"
"#,
    )
    .unwrap();
    let output = mensa_feed(&[
        "--year",
        "2015",
        "--profile-file",
        &profile.to_string_lossy(),
        &input,
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Fail: Unexpected price string: "));
    assert!(!stderr.contains("panicked"));
}

#[test]
fn test_feed_to_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, PASTA);
    let target = dir.path().join("feeds").join("fhrus_feed.xml");

    let output = mensa_feed(&["--year", "2015", "-o", &target.to_string_lossy(), &input]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(fs::read_to_string(target).unwrap().contains("<name>Pasta</name>"));
}

#[test]
fn test_bad_heading_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &PASTA.replace("Montag, 03. November", "Speiseplan"));

    let output = mensa_feed(&["--year", "2015", &input]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Fail: Unexpected date string: Speiseplan"));
}

#[test]
fn test_unreadable_input_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.xml");

    let output = mensa_feed(&[&missing.to_string_lossy()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Fail: "));
}

#[test]
fn test_custom_profile_file() {
    let dir = TempDir::new().unwrap();
    let profile = dir.path().join("casino.toml");
    fs::write(
        &profile,
        r#"
name = "casino"
days = "//day"
heading = "string(@label)"
rows = "./dish"
meal_name = "./title"
prices = "./price"
price_style = "student_base"
price_policy = "optional"
"#,
    )
    .unwrap();
    let input = write_input(
        &dir,
        r#"<menu><day label="Mo., 06.01."><dish><title>Eintopf</title><price>2,00</price></dish></day></menu>"#,
    );

    let output = mensa_feed(&[
        "--year",
        "2025",
        "--profile-file",
        &profile.to_string_lossy(),
        &input,
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("<day date='2025-01-06'>"));
    assert!(stdout.contains("<price role='other'>3.60</price>"));
}
