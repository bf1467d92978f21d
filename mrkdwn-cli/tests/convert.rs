use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn convert_file_to_stdout() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("message.txt");
    fs::write(&input_path, "*Ship it* _today_, see <https://ci.io|the build>").unwrap();

    let mut cmd = cargo_bin_cmd!("mrkdwn");
    cmd.arg("convert").arg(input_path.as_os_str());

    cmd.assert()
        .success()
        .stdout("**Ship it** __today__, see [the build](https://ci.io)");
}

#[test]
fn convert_is_the_default_command() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("message.txt");
    fs::write(&input_path, "~gone~").unwrap();

    let mut cmd = cargo_bin_cmd!("mrkdwn");
    cmd.arg(input_path.as_os_str());

    cmd.assert().success().stdout("~~gone~~");
}

#[test]
fn convert_reads_stdin() {
    let mut cmd = cargo_bin_cmd!("mrkdwn");
    cmd.arg("convert").arg("-").write_stdin("<mailto:a@b.io|Ann>\n");

    cmd.assert().success().stdout("mailto:a@b.io\n");
}

#[test]
fn convert_writes_output_file() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("message.txt");
    let output_path = dir.path().join("message.md");
    fs::write(&input_path, "*_both_*\n").unwrap();

    let mut cmd = cargo_bin_cmd!("mrkdwn");
    cmd.arg(input_path.as_os_str())
        .arg("-o")
        .arg(output_path.as_os_str());

    cmd.assert().success().stdout(predicate::str::is_empty());
    assert_eq!(fs::read_to_string(&output_path).unwrap(), "***both***\n");
}

#[test]
fn extra_params_override_conversion() {
    let mut cmd = cargo_bin_cmd!("mrkdwn");
    cmd.arg("convert")
        .arg("-")
        .arg("--extra-italic-style")
        .arg("star")
        .arg("--extra-no-links")
        .write_stdin("_x_ <https://a.io>");

    cmd.assert().success().stdout("*x* <https://a.io>");
}

#[test]
fn invalid_extra_value_fails() {
    let mut cmd = cargo_bin_cmd!("mrkdwn");
    cmd.arg("convert")
        .arg("-")
        .arg("--extra-italic-style")
        .arg("slanted")
        .write_stdin("_x_");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid italic style"));
}

#[test]
fn missing_input_file_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.txt");

    let mut cmd = cargo_bin_cmd!("mrkdwn");
    cmd.arg("convert").arg(missing.as_os_str());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error reading file"));
}

#[test]
fn list_rewriters_prints_stages_in_order() {
    let mut cmd = cargo_bin_cmd!("mrkdwn");
    cmd.arg("--list-rewriters");

    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();

    let code = stdout.find("code").expect("code stage listed");
    let links = stdout.find("links").expect("links stage listed");
    let emphasis = stdout.find("emphasis").expect("emphasis stage listed");
    assert!(code < links && links < emphasis);
}

#[test]
fn list_rewriters_respects_disabled_stages() {
    let mut cmd = cargo_bin_cmd!("mrkdwn");
    cmd.arg("--list-rewriters").arg("--extra-no-code");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("links").and(predicate::str::contains("code ").not()));
}
