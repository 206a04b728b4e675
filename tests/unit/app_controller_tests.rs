/*!
 * Tests for the application controller
 */

use narravid::app_config::Config;
use narravid::app_controller::Controller;

/// Test controller construction with the default configuration
#[test]
fn test_controller_creation_withDefaultConfig_shouldInitialize() {
    let controller = Controller::new_for_test().unwrap();
    assert!(controller.is_initialized());
}

/// Test controller construction with an explicit configuration
#[test]
fn test_controller_creation_withExplicitConfig_shouldInitialize() {
    let config = Config::default();
    let controller = Controller::with_config(config).unwrap();
    assert!(controller.is_initialized());
}

/// Test the initialization check against a hollowed-out configuration
#[test]
fn test_controller_is_initialized_withEmptyLanguage_shouldBeFalse() {
    let mut config = Config::default();
    config.narration_language = String::new();

    let controller = Controller::with_config(config).unwrap();
    assert!(!controller.is_initialized());
}
