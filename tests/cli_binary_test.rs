//! Runs the built `chatkit` binary.

use std::process::{Command, Output};

fn chatkit(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_chatkit"))
        .args(args)
        .env_remove("CHATKIT_API_KEY")
        .env_remove("CHATKIT_BASE_URL")
        .output()
        .expect("Failed to execute binary")
}

#[test]
fn test_short_and_long_version_flags_agree() {
    let long = chatkit(&["--version"]);
    let short = chatkit(&["-V"]);

    assert!(long.status.success());
    assert!(short.status.success());
    assert_eq!(long.stdout, short.stdout);
    assert_eq!(
        String::from_utf8_lossy(&long.stdout).trim(),
        format!("chatkit {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_version_flag_among_prompt_words_needs_no_config() {
    // No API key in the environment; the version flag must win before the
    // client is configured.
    let output = chatkit(&["--stream", "tell", "me", "-V", "a", "joke"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("chatkit "));
    assert!(output.stderr.is_empty());
}

#[test]
fn test_flags_without_prompt_print_usage() {
    for args in [&[][..], &["--stream"][..], &["-i", "-s"][..]] {
        let output = chatkit(args);

        assert_eq!(output.status.code(), Some(2), "args {:?}", args);
        assert!(output.stdout.is_empty());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Usage:"));
    }
}

#[test]
fn test_prompt_without_api_key_reports_hint() {
    let output = chatkit(&["--image", "a", "cat"]);

    assert!(!output.status.success());
    assert_ne!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to configure client"), "{}", stderr);
    assert!(stderr.contains("CHATKIT_API_KEY"), "{}", stderr);
    assert!(stderr.contains("Check your configuration settings"), "{}", stderr);
}
