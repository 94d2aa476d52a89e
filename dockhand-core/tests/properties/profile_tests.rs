//! Property tests for profile records and the profile store

use proptest::prelude::*;

use dockhand_core::config::{Profile, ProfileStore};
use dockhand_core::session::Credential;

fn profile_strategy() -> impl Strategy<Value = Profile> {
    (
        "[a-zA-Z0-9][a-zA-Z0-9 _-]{0,20}",
        "[a-z0-9][a-z0-9.-]{0,30}",
        "[a-z_][a-z0-9_-]{0,15}",
        "[a-zA-Z0-9+/=]{0,40}",
        1u16..,
        prop::option::of("[a-zA-Z0-9_/.~-]{1,40}"),
    )
        .prop_map(|(name, host, user, password, port, key_path)| Profile {
            name,
            host,
            user,
            password,
            port,
            key_path,
        })
}

proptest! {
    /// Property: profiles survive a save/load cycle byte for byte.
    #[test]
    fn store_round_trips_profiles(
        profiles in prop::collection::vec(profile_strategy(), 0..6)
    ) {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("profiles.json"));
        store.save(&profiles).unwrap();
        prop_assert_eq!(store.load().unwrap(), profiles);
    }

    /// Property: a profile with a key path always resolves to key
    /// authentication, regardless of any stored password.
    #[test]
    fn key_path_always_wins(profile in profile_strategy()) {
        prop_assume!(profile.key_path.is_some());
        let credential = profile
            .credential(|token| Ok(token.to_string()))
            .unwrap();
        prop_assert!(matches!(credential, Some(Credential::KeyFile(_))));
    }

    /// Property: without key or password there is nothing to authenticate
    /// with, and the decryptor is never consulted.
    #[test]
    fn bare_profiles_resolve_to_no_credential(profile in profile_strategy()) {
        let mut profile = profile;
        profile.key_path = None;
        profile.password = String::new();
        let credential = profile
            .credential(|_| Err("must not be called".to_string()))
            .unwrap();
        prop_assert!(credential.is_none());
    }

    /// Property: the endpoint of the session built from a profile matches
    /// the profile's fields.
    #[test]
    fn session_endpoint_matches_profile(profile in profile_strategy()) {
        let session = profile.session();
        prop_assert_eq!(session.host(), profile.host.as_str());
        prop_assert_eq!(session.port(), profile.port);
        prop_assert_eq!(session.username(), profile.user.as_str());
        prop_assert!(!session.is_connected());
    }
}
