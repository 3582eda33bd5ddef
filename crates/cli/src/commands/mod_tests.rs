// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use stalk_client::{Address, Encoding};

use super::*;

#[test]
fn no_flags_keep_config() {
    let base = ClientConfig::default();
    assert_eq!(ConnectionArgs::default().apply(base.clone()), base);
}

#[test]
fn address_flags_override() {
    let args = ConnectionArgs {
        host: Some("queue.local".into()),
        port: Some(11301),
        ..Default::default()
    };
    let config = args.apply(ClientConfig::default());
    assert_eq!(config.address, Address::new("queue.local", 11301));
}

#[test]
fn tube_is_used_and_watched() {
    let args = ConnectionArgs { tube: Some("mail".into()), ..Default::default() };
    let config = args.apply(ClientConfig::default());
    assert_eq!(config.use_tube, "mail");
    assert_eq!(config.watch, Watch::One("mail".into()));
}

#[test]
fn explicit_watch_wins_over_tube() {
    let args = ConnectionArgs {
        tube: Some("mail".into()),
        watch: vec!["a".into(), "b".into()],
        ..Default::default()
    };
    let config = args.apply(ClientConfig::default());
    assert_eq!(config.use_tube, "mail");
    assert_eq!(config.watch, Watch::Many(vec!["a".into(), "b".into()]));
}

#[test]
fn raw_disables_encoding() {
    let args = ConnectionArgs { raw: true, ..Default::default() };
    let config = args.apply(ClientConfig::default().with_encoding(Some(Encoding::Latin1)));
    assert_eq!(config.encoding, None);
}
