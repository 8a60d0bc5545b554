//! Integration tests for channel status modes and privilege queries.

mod common;

use common::*;
use slirc_presence::TrackerError;
use std::collections::BTreeSet;

fn staffed() -> slirc_presence::Tracker {
    let mut t = tracker(60);
    t.feed(prefix_caps("(qaohv)~&@%+"));
    t.feed(names("#chan", &["~q!q@q", "&a!a@a", "foo!f@f"]));
    t
}

#[test]
fn test_empty_mode_list_selects_by_any_status() {
    let t = staffed();
    assert_eq!(t.by_channel_modes("#chan", &[], false).unwrap(), vec!["foo"]);
    assert_eq!(t.by_channel_modes("#chan", &[], true).unwrap(), vec!["q", "a"]);
}

#[test]
fn test_mode_list_requires_all_or_none() {
    let mut t = staffed();
    assert!(t.by_channel_modes("#chan", &['q', 'a'], false).unwrap().is_empty());
    assert_eq!(t.by_channel_modes("#chan", &['q'], false).unwrap(), vec!["q"]);
    assert_eq!(
        t.by_channel_modes("#chan", &['q', 'a'], true).unwrap(),
        vec!["foo"]
    );

    t.feed(op("#chan", "q", 'a'));
    assert_eq!(
        t.by_channel_modes("#chan", &['q', 'a'], false).unwrap(),
        vec!["q"]
    );
}

#[test]
fn test_unknown_channel() {
    let t = staffed();
    assert_eq!(
        t.by_channel_modes("#nowhere", &['o'], false),
        Err(TrackerError::NoSuchChannel("#nowhere".into()))
    );
}

#[test]
fn test_privileges_follow_mode_events() {
    let mut t = staffed();
    t.feed(op("#chan", "foo", 'o'));
    t.feed(op("#chan", "foo", 'v'));
    assert_eq!(
        t.user_privileges("#chan", "foo").unwrap(),
        &BTreeSet::from(['o', 'v'])
    );

    t.feed(deop("#chan", "foo", 'o'));
    t.feed(deop("#chan", "foo", 'h'));
    assert_eq!(
        t.user_privileges("#chan", "FOO").unwrap(),
        &BTreeSet::from(['v'])
    );
}

#[test]
fn test_rejoin_resets_privileges() {
    let mut t = staffed();
    t.feed(part("#chan", "q"));
    t.feed(join("#chan", "q!q@q"));
    assert!(t.user_privileges("#chan", "q").unwrap().is_empty());
}

#[test]
fn test_privileges_by_token_and_handle() {
    let t = staffed();
    let handle = t.start_tracking("a").unwrap();
    assert!(t.user_privileges("#chan", &handle).unwrap().contains(&'a'));
    assert!(t.user_privileges("#chan", handle.token()).unwrap().contains(&'a'));
    assert!(matches!(
        t.user_privileges("#chan", "nobody"),
        Err(TrackerError::NoSuchUser(_))
    ));
}

#[test]
fn test_namesx_listing_keeps_every_prefix() {
    let mut t = tracker(60);
    t.feed(slirc_presence::TrackerEvent::Capabilities {
        casemapping: None,
        prefix: None,
        namesx: true,
        uhnames: true,
        userhost_in_names: false,
    });
    t.feed(names("#chan", &["@+foo!f@f"]));
    assert_eq!(
        t.user_privileges("#chan", "foo").unwrap(),
        &BTreeSet::from(['o', 'v'])
    );
}

#[test]
fn test_mode_filter_lists_folded_nicks() {
    let mut t = staffed();
    t.feed(nick("foo", "Fo[o]"));
    t.feed(op("#chan", "FO{O}", 'v'));
    assert_eq!(
        t.by_channel_modes("#chan", &['v'], false).unwrap(),
        vec!["fo{o}"]
    );
    assert_eq!(t.start_tracking("fo{o}").unwrap().to_string(), "Fo[o]");
}
