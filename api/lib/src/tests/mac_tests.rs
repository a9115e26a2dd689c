// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

use test_with_tracing::test;

use crate::tests::testvectors;
use crate::ByteView;
use crate::NcpError;
use crate::Provider;

fn provider() -> Provider {
    Provider::new().expect("provider")
}

#[test]
fn rfc4231_case_one() {
    let provider = provider();
    let mut mac = provider.hmac("SHA-256").expect("hmac");
    mac.init(testvectors::HMAC_CASE_1_KEY);
    mac.update(testvectors::HMAC_CASE_1_MSG);
    assert_eq!(
        hex::encode(mac.do_final().expect("final")),
        testvectors::HMAC_CASE_1_SHA256
    );

    let mut mac = provider.hmac("SHA-512").expect("hmac");
    mac.init(testvectors::HMAC_CASE_1_KEY);
    mac.update(testvectors::HMAC_CASE_1_MSG);
    assert_eq!(
        hex::encode(mac.do_final().expect("final")),
        testvectors::HMAC_CASE_1_SHA512
    );
}

#[test]
fn rfc4231_case_two_via_alias() {
    let provider = provider();
    let mut mac = provider.hmac("SHA256").expect("hmac");
    mac.init(testvectors::HMAC_CASE_2_KEY);
    mac.update(testvectors::HMAC_CASE_2_MSG);
    assert_eq!(
        hex::encode(mac.do_final().expect("final")),
        testvectors::HMAC_CASE_2_SHA256
    );
}

#[test]
fn final_consumes_the_buffer() {
    let provider = provider();
    let mut mac = provider.hmac("SHA-256").expect("hmac");
    mac.init(testvectors::HMAC_CASE_1_KEY);
    mac.update(testvectors::HMAC_CASE_1_MSG);
    let first = mac.do_final().expect("final");

    // Same key, fresh message.
    mac.update(testvectors::HMAC_CASE_1_MSG);
    let second = mac.do_final().expect("final");
    assert_eq!(first, second);

    // Empty message after the implicit reset.
    let empty = mac.do_final().expect("final");
    assert_ne!(first, empty);
}

#[test]
fn reset_discards_buffered_input() {
    let provider = provider();
    let mut mac = provider.hmac("SHA-256").expect("hmac");
    mac.init(testvectors::HMAC_CASE_1_KEY);
    mac.update(b"discarded");
    mac.reset();
    mac.update(testvectors::HMAC_CASE_1_MSG);
    assert_eq!(
        hex::encode(mac.do_final().expect("final")),
        testvectors::HMAC_CASE_1_SHA256
    );
}

#[test]
fn byte_slice_and_view_updates_agree() {
    let provider = provider();

    let mut by_slice = provider.hmac("SHA-256").expect("hmac");
    by_slice.init(testvectors::HMAC_CASE_2_KEY);
    by_slice.update(testvectors::HMAC_CASE_2_MSG);

    let mut by_byte = provider.hmac("SHA-256").expect("hmac");
    by_byte.init(testvectors::HMAC_CASE_2_KEY);
    for byte in testvectors::HMAC_CASE_2_MSG {
        by_byte.update_byte(*byte);
    }

    let mut by_view = provider.hmac("SHA-256").expect("hmac");
    by_view.init(testvectors::HMAC_CASE_2_KEY);
    let mut view = ByteView::array(testvectors::HMAC_CASE_2_MSG);
    by_view.update_view(&mut view);
    assert!(!view.has_remaining());

    let expected = by_slice.do_final().expect("final");
    assert_eq!(by_byte.do_final().expect("final"), expected);
    assert_eq!(by_view.do_final().expect("final"), expected);
}

#[test]
fn final_without_key_is_rejected() {
    let provider = provider();
    let mut mac = provider.hmac("SHA-256").expect("hmac");
    mac.update(b"data");
    assert_eq!(mac.do_final(), Err(NcpError::MacKeyNotSet));
}

#[test]
fn non_mac_digest_base_is_rejected() {
    let provider = provider();
    // BLAKE2b512 hashes but is not a supported MAC base.
    assert!(matches!(
        provider.hmac("BLAKE2b512"),
        Err(NcpError::UnsupportedAlgorithm(_))
    ));
}
