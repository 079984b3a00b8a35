use moodplay::cli::PlayerCommand;

#[test]
fn test_parse_simple_commands() {
    assert_eq!("p".parse(), Ok(PlayerCommand::Toggle));
    assert_eq!("".parse(), Ok(PlayerCommand::Toggle));
    assert_eq!("  Pause ".parse(), Ok(PlayerCommand::Toggle));
    assert_eq!("n".parse(), Ok(PlayerCommand::Next));
    assert_eq!("prev".parse(), Ok(PlayerCommand::Previous));
    assert_eq!("m".parse(), Ok(PlayerCommand::Mute));
    assert_eq!("?".parse(), Ok(PlayerCommand::Help));
    assert_eq!("exit".parse(), Ok(PlayerCommand::Quit));
}

#[test]
fn test_parse_commands_with_values() {
    assert_eq!("s 42.5".parse(), Ok(PlayerCommand::Seek(42.5)));
    assert_eq!("volume 0.3".parse(), Ok(PlayerCommand::Volume(0.3)));
    assert_eq!(
        "mood Relaxed".parse(),
        Ok(PlayerCommand::Mood("relaxed".to_string()))
    );
}

#[test]
fn test_parse_rejects_bad_input() {
    assert!("seek".parse::<PlayerCommand>().is_err());
    assert!("v loud".parse::<PlayerCommand>().is_err());
    assert!("mood".parse::<PlayerCommand>().is_err());
    assert!("dance".parse::<PlayerCommand>().is_err());
}
