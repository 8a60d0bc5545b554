//! Integration tests for hostmask searches over known users.

mod common;

use common::*;
use slirc_presence::TrackerError;

fn populated() -> slirc_presence::Tracker {
    let mut t = tracker(60);
    t.feed(join("#fr", "pierre!pj@lyon.example.fr"));
    t.feed(join("#fr", "marie!mc@paris.fr"));
    t.feed(join("#de", "hans!hk@berlin.example.de"));
    t.feed(names("#de", &["@anon"]));
    t
}

#[test]
fn test_host_suffix_search() {
    let t = populated();
    let mut found = t.ial("*!*@*.fr", None).unwrap();
    found.sort();
    assert_eq!(found, vec!["marie!mc@paris.fr", "pierre!pj@lyon.example.fr"]);
}

#[test]
fn test_unconfirmed_users_match_catch_all() {
    let t = populated();
    assert_eq!(t.ial("anon!*@*", None).unwrap(), vec!["anon!@"]);
    assert_eq!(t.ial("anon", None).unwrap(), vec!["anon!@"]);
    assert_eq!(t.ial("*", None).unwrap().len(), 4);
    assert!(t.ial("*!*@*.*", None).unwrap().iter().all(|m| m != "anon!@"));
}

#[test]
fn test_channel_scoped_search() {
    let t = populated();
    assert_eq!(
        t.ial("*!*@*", Some("#de")).unwrap(),
        vec!["hans!hk@berlin.example.de", "anon!@"]
    );
    assert_eq!(
        t.ial("*", Some("#nowhere")),
        Err(TrackerError::NoSuchChannel("#nowhere".into()))
    );
}

#[test]
fn test_partial_masks_and_wildcards() {
    let t = populated();
    assert_eq!(t.ial("?arie!mc", None).unwrap(), vec!["marie!mc@paris.fr"]);
    assert!(t.ial("marie!mc@paris", None).unwrap().is_empty());
    assert!(t.ial("pierre!pj@lyon.example.f?", None).unwrap().len() == 1);
    // Regex metacharacters are literal.
    assert!(t.ial("*!*@paris.f[r]", None).unwrap().is_empty());
    assert!(t.ial("marie!mc@paris.f.", None).unwrap().is_empty());
}
