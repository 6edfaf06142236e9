// imgcmp-viewer/tests/cli_tests.rs
//
// Argument parsing: image arity, verbosity count, --font / --config, and
// the path-or-URL split for image sources.

use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind;
use imgcmp_viewer::cli::Cli;
use imgcmp_viewer::source::ImageSource;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("imgcmp").chain(args.iter().copied()))
}

// ════════════════════════════════════════════════════════════════════
// Image arity
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_no_images_is_an_error() {
    let err = parse(&[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_single_image_is_view_mode() {
    let cli = parse(&["a.png"]).unwrap();
    assert_eq!(cli.images, vec!["a.png"]);
    assert!(!cli.is_diff());
}

#[test]
fn test_two_images_is_diff_mode() {
    let cli = parse(&["a.png", "b.png"]).unwrap();
    assert!(cli.is_diff());
    assert_eq!(cli.sources().len(), 2);
}

#[test]
fn test_three_images_is_an_error() {
    assert!(parse(&["a.png", "b.png", "c.png"]).is_err());
}

#[test]
fn test_help_and_version_are_not_usage_errors() {
    assert_eq!(parse(&["--help"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
    assert_eq!(parse(&["--version"]).unwrap_err().kind(), ErrorKind::DisplayVersion);
}

// ════════════════════════════════════════════════════════════════════
// Options
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_verbose_counts() {
    assert_eq!(parse(&["a.png"]).unwrap().verbose, 0);
    assert_eq!(parse(&["-v", "a.png"]).unwrap().verbose, 1);
    assert_eq!(parse(&["-vv", "a.png"]).unwrap().verbose, 2);
    assert_eq!(parse(&["--verbose", "-v", "a.png"]).unwrap().verbose, 2);
}

#[test]
fn test_font_and_config_paths() {
    let cli = parse(&["--font", "atlas.png", "--config", "viewer.json", "a.png"]).unwrap();
    assert_eq!(cli.font, Some(PathBuf::from("atlas.png")));
    assert_eq!(cli.config, Some(PathBuf::from("viewer.json")));
}

#[test]
fn test_options_default_to_none() {
    let cli = parse(&["a.png"]).unwrap();
    assert!(cli.font.is_none());
    assert!(cli.config.is_none());
}

// ════════════════════════════════════════════════════════════════════
// Sources
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_sources_split_paths_and_urls() {
    let cli = parse(&["local.png", "https://example.com/b.png"]).unwrap();
    let sources = cli.sources();
    assert_eq!(sources[0], ImageSource::File(PathBuf::from("local.png")));
    assert_eq!(
        sources[1],
        ImageSource::Url("https://example.com/b.png".to_string())
    );
}
