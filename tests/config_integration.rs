use std::path::PathBuf;

use cvpress::config::{ConfigFlags, load_config_flags, parse_flag_tokens};
use cvpress::theme::Theme;

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".cvpressrc");
    let content = r"
# comment
--watch

--theme light

--rasterizer=google-chrome
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.watch);
    assert_eq!(flags.theme, Some(Theme::Light));
    assert_eq!(flags.rasterizer, Some(PathBuf::from("google-chrome")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".cvpressrc");
    let content = "--watch\n--theme light\n--rasterizer chromium\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "cvpress".to_string(),
        "--theme".to_string(),
        "dark".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.watch, "file flags should remain enabled");
    assert_eq!(effective.theme, Some(Theme::Dark), "cli should override theme");
    assert_eq!(
        effective.rasterizer,
        Some(PathBuf::from("chromium")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "cvpress".to_string(),
        "--theme=dark".to_string(),
        "--rasterizer=msedge".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.theme, Some(Theme::Dark));
    assert_eq!(flags.rasterizer, Some(PathBuf::from("msedge")));
}

#[test]
fn test_config_union_merges_booleans() {
    let file = ConfigFlags {
        watch: true,
        ..ConfigFlags::default()
    };
    let cli = ConfigFlags::default();
    let merged = file.union(&cli);
    assert!(merged.watch);
}
