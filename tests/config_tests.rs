// Integration tests for command-line configuration

use clap::Parser;
use gradebook::config::Config;

#[test]
fn test_defaults_are_valid() {
    let config = Config::try_parse_from(["gradebook"]).unwrap();
    assert_eq!(config.max_classes, 20);
    assert_eq!(config.max_students, 100);
    assert!(config.validate().is_ok());
}

#[test]
fn test_zero_capacity_rejected() {
    for args in [
        ["gradebook", "--max-classes", "0"],
        ["gradebook", "--max-students", "0"],
    ] {
        let config = Config::try_parse_from(args).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.contains("must be positive"));
    }
}

#[test]
fn test_custom_capacities_accepted() {
    let config =
        Config::try_parse_from(["gradebook", "--max-classes", "3", "--max-students", "7"]).unwrap();
    assert_eq!((config.max_classes, config.max_students), (3, 7));
    assert!(config.validate().is_ok());
}
