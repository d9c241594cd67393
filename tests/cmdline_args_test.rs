//! Tests for command-line argument parsing
//!
//! Note: These tests verify the argument parser configuration by creating
//! a test parser with the same structure as the main application.

use clap::{Arg, ArgAction, Command as ClapCommand};

/// Create a command with the same argument structure as the main binary
fn create_test_command() -> ClapCommand {
    ClapCommand::new("hand-media-control")
        .version("0.1.0")
        .about("Hand gesture media controller driven by a landmark bridge")
        .arg(
            Arg::new("config")
                .short('C')
                .long("config")
                .value_name("PATH")
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("PATH")
                .help("File of JSON detection records to replay"),
        )
        .arg(
            Arg::new("dispatch")
                .long("dispatch")
                .value_name("BACKEND")
                .help("Dispatch backend"),
        )
        .arg(
            Arg::new("gui")
                .short('g')
                .long("gui")
                .action(ArgAction::SetTrue)
                .help("Open the preview window"),
        )
        .arg(
            Arg::new("flip")
                .long("flip")
                .action(ArgAction::SetTrue)
                .help("Mirror landmark x coordinates"),
        )
        .arg(
            Arg::new("max-frames")
                .long("max-frames")
                .value_name("N")
                .value_parser(clap::value_parser!(u64))
                .help("Stop after this many frames"),
        )
        .arg(
            Arg::new("print-config")
                .long("print-config")
                .action(ArgAction::SetTrue)
                .help("Print an example configuration and exit"),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Enable debug output"),
        )
        .arg(
            Arg::new("bridge")
                .long("bridge")
                .value_name("CMD")
                .num_args(1..)
                .allow_hyphen_values(true)
                .conflicts_with("input")
                .help("Landmark bridge command to spawn"),
        )
}

#[test]
fn test_help_argument() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["hand-media-control", "--help"]);

    // Help should cause an error (but a specific help error)
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn test_no_arguments() {
    let cmd = create_test_command();
    let matches = cmd.try_get_matches_from(vec!["hand-media-control"]).unwrap();

    assert_eq!(matches.get_one::<String>("input"), None);
    assert!(!matches.get_flag("gui"));
    assert!(!matches.get_flag("debug"));
    assert_eq!(matches.get_one::<u64>("max-frames"), None);
}

#[test]
fn test_input_and_limits() {
    let cmd = create_test_command();
    let matches = cmd
        .try_get_matches_from(vec![
            "hand-media-control",
            "-i",
            "session.jsonl",
            "--max-frames",
            "300",
            "--dispatch",
            "x11",
            "--gui",
            "--flip",
        ])
        .unwrap();

    assert_eq!(matches.get_one::<String>("input").map(String::as_str), Some("session.jsonl"));
    assert_eq!(matches.get_one::<u64>("max-frames"), Some(&300));
    assert_eq!(matches.get_one::<String>("dispatch").map(String::as_str), Some("x11"));
    assert!(matches.get_flag("gui"));
    assert!(matches.get_flag("flip"));
}

#[test]
fn test_invalid_frame_limit() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["hand-media-control", "--max-frames", "-3"]);
    assert!(result.is_err());
}

#[test]
fn test_bridge_takes_the_rest() {
    let cmd = create_test_command();
    let matches = cmd
        .try_get_matches_from(vec![
            "hand-media-control",
            "--debug",
            "--bridge",
            "python3",
            "hand_bridge.py",
            "--camera",
            "0",
        ])
        .unwrap();

    let bridge: Vec<&str> = matches
        .get_many::<String>("bridge")
        .unwrap()
        .map(String::as_str)
        .collect();
    assert_eq!(bridge, ["python3", "hand_bridge.py", "--camera", "0"]);
    assert!(matches.get_flag("debug"));
}

#[test]
fn test_bridge_input_conflict() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec![
        "hand-media-control",
        "--input",
        "session.jsonl",
        "--bridge",
        "python3",
    ]);

    // Should fail due to conflict
    assert!(result.is_err());
}

/// Run the real binary with the given arguments
fn run_binary(args: &[&str]) -> std::process::Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_hand-media-control"))
        .args(args)
        .output()
        .expect("binary runs")
}

#[test]
fn test_binary_help_matches_test_command() {
    let output = run_binary(&["--help"]);
    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);

    for arg in create_test_command().get_arguments() {
        let long = arg.get_long().unwrap();
        assert!(help.contains(&format!("--{long}")), "binary lacks --{long}");
        if let Some(short) = arg.get_short() {
            assert!(help.contains(&format!("-{short}, --{long}")), "binary lacks -{short} for --{long}");
        }
    }
}

#[test]
fn test_binary_rejects_bridge_with_input() {
    let output = run_binary(&["--input", "session.jsonl", "--bridge", "python3"]);
    assert!(!output.status.success());
}

#[test]
fn test_binary_print_config() {
    let output = run_binary(&["--print-config"]);
    assert!(output.status.success());
    let config: hand_media_control::config::Config =
        serde_yaml::from_slice(&output.stdout).expect("example config parses");
    assert!(config.validate().is_ok());
}
