use super::*;

#[test]
fn short_name_is_last_path_segment() {
    let uri = Url::parse("file:///tmp/game/player.verse").expect("uri");
    assert_eq!(short_name(&uri), "player.verse");
}

#[test]
fn client_messages_carry_server_prefix() {
    assert_eq!(prefixed_client_message("Opened a.verse"), "verse-explorer: Opened a.verse");
}
