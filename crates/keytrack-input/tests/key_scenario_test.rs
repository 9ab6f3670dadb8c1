use keytrack_input::{
    InputConfig, KeyCode, KeyEvent, KeyState, Keyboard, MockTimeProvider, Modifiers, RawKeyEvent,
    Transition,
};

const SPACE: u32 = 32;

#[test]
fn test_press_repeat_release_cycle() {
    let mut state = KeyState::new(SPACE);

    state.update(&KeyEvent::press(SPACE, 0));
    state.update(&KeyEvent::press(SPACE, 5));
    state.update(&KeyEvent::release(SPACE, 20));

    assert!(!state.is_down());
    assert!(state.is_up());
    assert_eq!(state.repeats(), 1);
    assert_eq!(state.time_down_us(), 0);
    assert_eq!(state.time_up_us(), 20);
}

#[test]
fn test_modifiers_recaptured_on_each_press() {
    let mut state = KeyState::new(SPACE);

    state.update(&KeyEvent::press_with(SPACE, 0, Modifiers::shift()));
    assert!(state.modifiers().shift);

    state.update(&KeyEvent::release(SPACE, 10));
    assert!(state.modifiers().shift);

    state.update(&KeyEvent::press_with(SPACE, 15, Modifiers::NONE));
    assert!(!state.modifiers().shift);
}

#[test]
fn test_untouched_key_queries() {
    let state = KeyState::new(SPACE);

    assert!(!state.is_down());
    assert!(!state.is_up());
    assert!(!state.just_pressed(0, 1_000));
    assert!(!state.just_released(0, 1_000));
}

#[test]
fn test_dwell_threshold() {
    let state = KeyState::with_event(&KeyEvent::press(SPACE, 100));

    assert!(!state.just_pressed(50, 140));
    assert!(state.just_pressed(50, 151));
}

#[test]
fn test_keyboard_replays_json_capture() {
    let capture = r#"
        {"code":65,"type":"keydown","timestamp":1000,"ctrlKey":true}
        {"code":65,"type":"keydown","timestamp":1030}
        {"code":66,"type":"keydown","timestamp":1040}
        {"code":65,"type":"keypress","timestamp":1045}
        {"code":65,"type":"keyup","timestamp":1100}
    "#;

    let time = MockTimeProvider::new();
    let mut keyboard = Keyboard::new(InputConfig::default(), &time);
    let transitions: Vec<Transition> = capture
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str::<RawKeyEvent>(line).unwrap())
        .map(|raw| keyboard.handle_raw(&raw).unwrap())
        .collect();

    assert_eq!(
        transitions,
        vec![
            Transition::Pressed,
            Transition::Repeated,
            Transition::Pressed,
            Transition::Ignored,
            Transition::Released,
        ]
    );

    let a = keyboard.key(KeyCode(65)).unwrap();
    assert!(a.is_up());
    assert_eq!(a.repeats(), 1);
    assert!(a.modifiers().ctrl);
    assert_eq!(a.duration_us(0), 100);

    time.set_time(1040 + 200_001);
    assert!(keyboard.just_pressed(KeyCode(66)));
    assert!(!keyboard.just_released(KeyCode(65)));
    assert_eq!(keyboard.key(KeyCode(66)).map(KeyState::repeats), Some(0));

    time.set_time(1100 + 200_001);
    assert!(keyboard.just_released(KeyCode(65)));
}

#[test]
fn test_strict_keyboard_skips_bad_records() {
    let config = InputConfig {
        strict: true,
        ..InputConfig::default()
    };
    let mut keyboard = Keyboard::new(config, MockTimeProvider::new());

    assert!(keyboard.handle_event(&KeyEvent::press(SPACE, 500)).is_ok());
    assert!(keyboard.handle_event(&KeyEvent::release(SPACE, 400)).is_err());
    assert!(keyboard.handle_event(&KeyEvent::release(SPACE, 600)).is_ok());

    let state = keyboard.key(SPACE).unwrap();
    assert_eq!(state.time_up_us(), 600);
}
