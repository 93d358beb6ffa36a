mod common;

use common::QUERY;
use randrctl::{
    Output, Position, Profile, Rate, Resolution, Rotation,
    xrandr::{XrandrError, apply_args, current_profile, parse_query},
};

#[test]
fn test_parse_query() -> Result<(), Box<dyn std::error::Error>> {
    let _ = env_logger::builder().is_test(true).try_init();

    let outputs = parse_query(QUERY)?;
    let names: Vec<_> = outputs.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, ["eDP1", "HDMI1", "VGA1", "DP1"]);

    let edp = &outputs[0];
    assert!(edp.connected);
    assert!(edp.primary);
    assert_eq!(
        edp.geometry,
        Some((Resolution::new(1366, 768), Position::new(0, 0)))
    );
    assert_eq!(edp.rotation, Rotation::Normal);
    assert_eq!(edp.rate, Some(Rate::new(60.0)));

    // rotated outputs report their transposed size
    let hdmi = &outputs[1];
    assert!(!hdmi.primary);
    assert_eq!(hdmi.rotation, Rotation::Left);
    assert_eq!(
        hdmi.geometry,
        Some((Resolution::new(1920, 1080), Position::new(1366, 0)))
    );
    assert_eq!(hdmi.rate, Some(Rate::new(59.94)));

    let vga = &outputs[2];
    assert!(!vga.connected);
    assert!(!vga.is_active());

    let dp = &outputs[3];
    assert!(dp.connected);
    assert!(!dp.is_active());
    assert_eq!(dp.rate, None);

    Ok(())
}

#[test]
fn test_parse_query_without_outputs() {
    let result = parse_query("Screen 0: minimum 8 x 8, current 0 x 0, maximum 32767 x 32767\n");
    assert!(matches!(result, Err(XrandrError::Parse(_))));
}

#[test]
fn test_parse_query_bad_geometry() {
    let result = parse_query("eDP1 connected 1366x768+zero+0 (normal)\n");
    assert!(matches!(result, Err(XrandrError::Parse(_))));
}

#[test]
fn test_current_profile_contains_active_outputs() -> Result<(), Box<dyn std::error::Error>> {
    let outputs = parse_query(QUERY)?;
    let profile = current_profile("current", &outputs);

    assert_eq!(profile.name, "current");
    assert_eq!(profile.primary.as_deref(), Some("eDP1"));
    assert_eq!(
        profile.outputs.keys().map(String::as_str).collect::<Vec<_>>(),
        ["HDMI1", "eDP1"]
    );
    assert_eq!(
        profile.outputs["HDMI1"],
        Output {
            mode: Resolution::new(1920, 1080),
            pos: Position::new(1366, 0),
            rotate: Rotation::Left,
            rate: Some(Rate::new(59.94)),
        }
    );

    Ok(())
}

#[test]
fn test_apply_args_turns_off_other_outputs() -> Result<(), Box<dyn std::error::Error>> {
    let outputs = parse_query(QUERY)?;
    let mut profile = Profile::new("laptop");
    profile.outputs.insert(
        "eDP1".to_string(),
        Output {
            mode: Resolution::new(1366, 768),
            pos: Position::new(0, 0),
            rotate: Rotation::Normal,
            rate: Some(Rate::new(60.0)),
        },
    );
    profile.primary = Some("eDP1".to_string());

    let args = apply_args(&profile, &outputs)?;
    assert_eq!(
        args.join(" "),
        "--output eDP1 --mode 1366x768 --pos 0x0 --rotate normal --rate 60.00 --primary \
         --output HDMI1 --off --output VGA1 --off --output DP1 --off"
    );

    Ok(())
}

#[test]
fn test_apply_args_requires_connected_outputs() -> Result<(), Box<dyn std::error::Error>> {
    let outputs = parse_query(QUERY)?;
    let mut profile = Profile::new("projector");
    profile.outputs.insert(
        "VGA1".to_string(),
        Output {
            mode: Resolution::new(1024, 768),
            pos: Position::default(),
            rotate: Rotation::default(),
            rate: None,
        },
    );

    let result = apply_args(&profile, &outputs);
    assert!(matches!(result, Err(XrandrError::NotConnected(name)) if name == "VGA1"));

    Ok(())
}
