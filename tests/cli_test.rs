//! CLI integration tests for the ocpp-codegen binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("ocpp-codegen"))
}

fn write_templates(dir: &Path) {
    fs::write(
        dir.join("enum.hbs"),
        "enum {{type.name}} {{#each type.values}}{{this}} {{/each}}",
    )
    .unwrap();
    fs::write(
        dir.join("type.hbs"),
        "type {{type.name}} {{#each type.fields}}{{name}} {{/each}}",
    )
    .unwrap();
    fs::write(
        dir.join("message.hbs"),
        "message {{request_type_name}} {{response_type_name}} {{namespace}}",
    )
    .unwrap();
}

fn write_pair(dir: &Path, name: &str, request: &str, response: &str) {
    fs::write(dir.join(format!("{name}Request.json")), request).unwrap();
    fs::write(dir.join(format!("{name}Response.json")), response).unwrap();
}

fn write_reset_pair(dir: &Path) {
    write_pair(
        dir,
        "Reset",
        r##"{
            "$id": "urn:Reset.req",
            "comment": "Reset request",
            "type": "object",
            "properties": { "type": { "$ref": "#/definitions/ResetEnumType" } },
            "required": ["type"],
            "definitions": {
                "ResetEnumType": { "type": "string", "enum": ["Immediate", "OnIdle"] }
            }
        }"##,
        r#"{ "$id": "urn:Reset.conf", "comment": "Reset response", "type": "object" }"#,
    );
}

mod generate_command {
    use super::*;

    #[test]
    fn generates_all_operations() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let templates = TempDir::new().unwrap();
        write_templates(templates.path());
        write_reset_pair(input.path());

        cmd()
            .args([
                "generate",
                "--input",
                input.path().to_str().unwrap(),
                "--output",
                output.path().to_str().unwrap(),
                "--templates",
                templates.path().to_str().unwrap(),
                "--namespace",
                "ocpp20",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Reset"))
            .stdout(predicate::str::contains("1 operations, all generated"));

        let enum_file = output.path().join("types/ResetEnumType.rs");
        assert_eq!(
            fs::read_to_string(enum_file).unwrap(),
            "enum ResetEnumType Immediate OnIdle "
        );

        let message_file = output.path().join("messages/Reset.rs");
        assert_eq!(
            fs::read_to_string(message_file).unwrap(),
            "message ResetReq ResetConf ocpp20"
        );
    }

    #[test]
    fn custom_extension() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let templates = TempDir::new().unwrap();
        write_templates(templates.path());
        write_reset_pair(input.path());

        cmd()
            .args([
                "generate",
                "--input",
                input.path().to_str().unwrap(),
                "--output",
                output.path().to_str().unwrap(),
                "--templates",
                templates.path().to_str().unwrap(),
                "--namespace",
                "ocpp20",
                "--extension",
                "cpp",
            ])
            .assert()
            .success();

        assert!(output.path().join("messages/Reset.cpp").exists());
    }

    #[test]
    fn failed_operation_reports_and_continues() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let templates = TempDir::new().unwrap();
        write_templates(templates.path());
        write_reset_pair(input.path());
        // Request without its response document.
        fs::write(
            input.path().join("BrokenRequest.json"),
            r#"{ "$id": "urn:Broken.req", "comment": "c", "type": "object" }"#,
        )
        .unwrap();

        cmd()
            .args([
                "generate",
                "--input",
                input.path().to_str().unwrap(),
                "--output",
                output.path().to_str().unwrap(),
                "--templates",
                templates.path().to_str().unwrap(),
                "--namespace",
                "ocpp20",
            ])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("Broken"))
            .stdout(predicate::str::contains("file not found"))
            .stdout(predicate::str::contains("1 generated, 1 failed"));

        // The sibling operation still generated.
        assert!(output.path().join("messages/Reset.rs").exists());
    }

    #[test]
    fn quiet_suppresses_success_lines() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let templates = TempDir::new().unwrap();
        write_templates(templates.path());
        write_reset_pair(input.path());

        cmd()
            .args([
                "generate",
                "--input",
                input.path().to_str().unwrap(),
                "--output",
                output.path().to_str().unwrap(),
                "--templates",
                templates.path().to_str().unwrap(),
                "--namespace",
                "ocpp20",
                "--quiet",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("✓ Reset").not())
            .stdout(predicate::str::contains("all generated"));
    }

    #[test]
    fn missing_template_is_fatal() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let templates = TempDir::new().unwrap();
        write_reset_pair(input.path());

        cmd()
            .args([
                "generate",
                "--input",
                input.path().to_str().unwrap(),
                "--output",
                output.path().to_str().unwrap(),
                "--templates",
                templates.path().to_str().unwrap(),
                "--namespace",
                "ocpp20",
            ])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("missing template"));
    }

    #[test]
    fn missing_input_dir_is_fatal() {
        let output = TempDir::new().unwrap();
        let templates = TempDir::new().unwrap();
        write_templates(templates.path());

        cmd()
            .args([
                "generate",
                "--input",
                "/nonexistent/schemas",
                "--output",
                output.path().to_str().unwrap(),
                "--templates",
                templates.path().to_str().unwrap(),
                "--namespace",
                "ocpp20",
            ])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("input directory not found"));
    }
}

mod check_command {
    use super::*;

    #[test]
    fn all_operations_pass() {
        let input = TempDir::new().unwrap();
        write_reset_pair(input.path());

        cmd()
            .args(["check", input.path().to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("1 operations, all passed"));
    }

    #[test]
    fn malformed_schema_fails_with_cause() {
        let input = TempDir::new().unwrap();
        write_reset_pair(input.path());
        write_pair(
            input.path(),
            "Bad",
            r#"{ "$id": "urn:Bad.req", "comment": "c", "type": "object",
                 "properties": { "x": { "type": "blob" } } }"#,
            r#"{ "$id": "urn:Bad.conf", "comment": "c", "type": "object" }"#,
        );

        cmd()
            .args(["check", input.path().to_str().unwrap()])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("unsupported schema type \"blob\""))
            .stdout(predicate::str::contains("1 passed, 1 failed"));
    }

    #[test]
    fn json_format() {
        let input = TempDir::new().unwrap();
        write_reset_pair(input.path());

        cmd()
            .args(["check", input.path().to_str().unwrap(), "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""operations": 1"#))
            .stdout(predicate::str::contains(r#""failed": 0"#));
    }

    #[test]
    fn listed_operation_without_schema_pair_fails() {
        let input = TempDir::new().unwrap();
        write_reset_pair(input.path());
        fs::write(
            input.path().join("list.json"),
            r#"{"from_csms": ["Reset", "ReserveNow"]}"#,
        )
        .unwrap();

        cmd()
            .args(["check", input.path().to_str().unwrap()])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("ReserveNow"))
            .stdout(predicate::str::contains("no schema pair found"));
    }

    #[test]
    fn missing_input_dir_is_fatal() {
        cmd()
            .args(["check", "/nonexistent/schemas"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("input directory not found"));
    }
}
