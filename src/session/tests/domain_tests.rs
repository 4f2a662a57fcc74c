//! Unit tests for session domain types.

use crate::session::domain::{
    CurrentUser, DEFAULT_DISPLAY_NAME, Identity, Profile, SessionState, UserId,
};
use mockable::DefaultClock;
use rstest::rstest;

// ============================================================================
// Display-name resolution
// ============================================================================

#[rstest]
fn profile_display_name_wins_over_gateway_metadata() {
    let clock = DefaultClock;
    let uid = UserId::new();
    let identity = Identity::new(uid, "a@x.com", Some("gateway-name".to_owned()));
    let profile = Profile::new(uid, "a@x.com", "profile-name", &clock);

    let user = CurrentUser::resolve(&identity, Some(&profile));
    assert_eq!(user.display_name(), "profile-name");
}

#[rstest]
fn gateway_metadata_used_when_no_profile_exists() {
    let identity = Identity::new(UserId::new(), "a@x.com", Some("gateway-name".to_owned()));

    let user = CurrentUser::resolve(&identity, None);
    assert_eq!(user.display_name(), "gateway-name");
}

#[rstest]
fn anonymous_when_neither_source_has_a_name() {
    let identity = Identity::new(UserId::new(), "a@x.com", None);

    let user = CurrentUser::resolve(&identity, None);
    assert_eq!(user.display_name(), DEFAULT_DISPLAY_NAME);
}

#[rstest]
fn empty_gateway_name_falls_through_to_anonymous() {
    let identity = Identity::new(UserId::new(), "a@x.com", Some(String::new()));

    let user = CurrentUser::resolve(&identity, None);
    assert_eq!(user.display_name(), DEFAULT_DISPLAY_NAME);
}

#[rstest]
fn resolution_preserves_uid_and_email() {
    let uid = UserId::new();
    let identity = Identity::new(uid, "a@x.com", None);

    let user = CurrentUser::resolve(&identity, None);
    assert_eq!(user.uid(), uid);
    assert_eq!(user.email(), "a@x.com");
}

// ============================================================================
// Session state transitions
// ============================================================================

#[rstest]
fn initial_state_is_loading_and_signed_out() {
    let state = SessionState::initial();
    assert!(state.is_loading());
    assert!(state.current_user().is_none());
}

#[rstest]
fn sign_in_settles_loading() {
    let identity = Identity::new(UserId::new(), "a@x.com", None);
    let user = CurrentUser::resolve(&identity, None);

    let mut state = SessionState::initial();
    state.sign_in(user.clone());

    assert!(!state.is_loading());
    assert_eq!(state.current_user(), Some(&user));
}

#[rstest]
fn sign_out_settles_loading_and_clears_user() {
    let identity = Identity::new(UserId::new(), "a@x.com", None);

    let mut state = SessionState::initial();
    state.sign_in(CurrentUser::resolve(&identity, None));
    state.sign_out();

    assert!(!state.is_loading());
    assert!(state.current_user().is_none());
}

#[rstest]
fn sign_out_on_fresh_state_settles_loading() {
    // The gateway's first notification can be "nobody is signed in".
    let mut state = SessionState::initial();
    state.sign_out();
    assert!(!state.is_loading());
}

// ============================================================================
// Profile documents
// ============================================================================

#[rstest]
fn profile_records_creation_time() {
    let clock = DefaultClock;
    let profile = Profile::new(UserId::new(), "a@x.com", "alice", &clock);
    assert!(profile.created_at().timestamp() > 0);
}

#[rstest]
fn profile_serialises_round_trip() {
    let clock = DefaultClock;
    let profile = Profile::new(UserId::new(), "a@x.com", "alice", &clock);

    let encoded = serde_json::to_string(&profile).expect("profile should encode");
    let decoded: Profile = serde_json::from_str(&encoded).expect("profile should decode");
    assert_eq!(decoded, profile);
}
