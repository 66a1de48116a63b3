#![allow(missing_docs)]

mod support;

use support::convert_fixture;

#[test]
fn convert_text_output_lists_skipped_fields() {
	let output = convert_fixture("X", "Summary", &[]);
	assert!(output.status.success(), "convert should succeed: {}", String::from_utf8_lossy(&output.stderr));

	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("Count: 9"), "stdout: {stdout}");
	assert!(stdout.contains("Label: Y"), "stdout: {stdout}");
	assert!(stdout.contains("skipped: 1"), "stdout: {stdout}");
	assert!(stdout.contains("Owner: no source value at Owner.Name"), "stdout: {stdout}");
	assert!(!stdout.contains("note"), "private field printed: {stdout}");
}

#[test]
fn convert_text_output_hides_private_fields() {
	let output = convert_fixture("X", "A", &[]);
	assert!(output.status.success(), "convert should succeed: {}", String::from_utf8_lossy(&output.stderr));

	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("YID: 8"), "stdout: {stdout}");
	assert!(!stdout.contains("wall"), "private field printed: {stdout}");
}

#[test]
fn skipped_fields_are_logged_on_stderr() {
	let output = convert_fixture("X", "Summary", &["--json"]);
	assert!(output.status.success());

	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("field not converted"), "stderr: {stderr}");
	assert!(serde_json::from_slice::<serde_json::Value>(&output.stdout).is_ok(), "stdout must stay plain json");
}

#[test]
fn unknown_destination_record_fails() {
	let output = convert_fixture("X", "Nope", &[]);

	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("error: unknown record type: Nope"));
}
