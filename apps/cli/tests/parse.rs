//! Tests for CLI argument parsing.

use clap::Parser;
use genway_cli::{Cli, Command};
use std::path::Path;

#[test]
fn cli_parse_generate() {
    let cli = Cli::parse_from(["genway", "generate", "hello world"]);
    match cli.command {
        Command::Generate(cmd) => {
            assert_eq!(cmd.prompt, "hello world");
            assert_eq!(cmd.system, "");
            assert!(cmd.images.is_empty());
            assert!(cmd.tag.is_none());
        }
        _ => panic!("expected Generate command"),
    }
}

#[test]
fn cli_parse_generate_with_images() {
    let cli = Cli::parse_from([
        "genway",
        "generate",
        "--system",
        "be brief",
        "--image",
        "a.png",
        "-i",
        "https://example.com/b.jpg",
        "--tag",
        "<image>",
        "compare <image> and <image>",
    ]);
    match cli.command {
        Command::Generate(cmd) => {
            assert_eq!(cmd.system, "be brief");
            assert_eq!(cmd.images, ["a.png", "https://example.com/b.jpg"]);
            assert_eq!(cmd.tag.as_deref(), Some("<image>"));
        }
        _ => panic!("expected Generate command"),
    }
}

#[test]
fn cli_parse_chat() {
    let cli = Cli::parse_from(["genway", "chat", "-s", "sys", "history.json"]);
    match cli.command {
        Command::Chat(cmd) => {
            assert_eq!(cmd.system, "sys");
            assert_eq!(cmd.history, Path::new("history.json"));
        }
        _ => panic!("expected Chat command"),
    }
}

#[test]
fn cli_parse_global_config_flag() {
    let cli = Cli::parse_from(["genway", "chat", "-", "--config", "/tmp/genway.toml"]);
    assert_eq!(cli.config.as_deref(), Some(Path::new("/tmp/genway.toml")));
}

#[test]
fn cli_requires_prompt() {
    assert!(Cli::try_parse_from(["genway", "generate"]).is_err());
}
