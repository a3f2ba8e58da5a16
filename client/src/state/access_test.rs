use super::*;

#[test]
fn access_state_default_is_closed() {
    assert!(!AccessState::default().open);
}

#[test]
fn access_state_constructors() {
    assert!(AccessState::open().open);
    assert_eq!(AccessState::closed(), AccessState::default());
}
