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
fn known_answer_vectors() {
    let provider = provider();
    for (name, empty_hex, fox_hex) in testvectors::DIGEST_VECTORS {
        let mut digest = provider.message_digest(name).expect(name);
        assert_eq!(hex::encode(digest.digest().expect(name)), *empty_hex, "{name}");
        digest.update(testvectors::FOX).expect(name);
        assert_eq!(hex::encode(digest.digest().expect(name)), *fox_hex, "{name}");
        digest.close();
    }
}

#[test]
fn truncated_sha512_variants() {
    let provider = provider();
    let mut digest = provider.message_digest("SHA-512/224").expect("sha512/224");
    digest.update(testvectors::FOX).expect("update");
    assert_eq!(
        hex::encode(digest.digest().expect("digest")),
        testvectors::SHA512_224_FOX
    );
    let mut digest = provider.message_digest("SHA-512/256").expect("sha512/256");
    digest.update(testvectors::FOX).expect("update");
    assert_eq!(
        hex::encode(digest.digest().expect("digest")),
        testvectors::SHA512_256_FOX
    );
}

#[test]
fn digest_consumes_input_and_resets() {
    let provider = provider();
    let mut digest = provider.message_digest("SHA-256").expect("digest");
    digest.update(testvectors::FOX).expect("update");
    let first = digest.digest().expect("digest");

    // The second call sees a fresh stream.
    let second = digest.digest().expect("digest");
    let (_, empty_hex, fox_hex) = testvectors::DIGEST_VECTORS
        .iter()
        .find(|(name, _, _)| *name == "SHA-256")
        .unwrap();
    assert_eq!(hex::encode(first), *fox_hex);
    assert_eq!(hex::encode(second), *empty_hex);
}

#[test]
fn explicit_reset_discards_input() {
    let provider = provider();
    let mut digest = provider.message_digest("SHA-256").expect("digest");
    digest.update(b"discarded").expect("update");
    digest.reset().expect("reset");
    digest.update(testvectors::FOX).expect("update");
    let (_, _, fox_hex) = testvectors::DIGEST_VECTORS
        .iter()
        .find(|(name, _, _)| *name == "SHA-256")
        .unwrap();
    assert_eq!(hex::encode(digest.digest().expect("digest")), *fox_hex);
}

#[test]
fn byte_and_slice_updates_agree() {
    let provider = provider();
    let mut by_slice = provider.message_digest("SHA-256").expect("digest");
    by_slice.update(testvectors::FOX).expect("update");

    let mut by_byte = provider.message_digest("SHA-256").expect("digest");
    for byte in testvectors::FOX {
        by_byte.update_byte(*byte).expect("update byte");
    }

    assert_eq!(
        by_slice.digest().expect("digest"),
        by_byte.digest().expect("digest")
    );
}

#[test]
fn empty_update_is_a_no_op() {
    let provider = provider();
    let mut digest = provider.message_digest("SHA-256").expect("digest");
    digest.update(&[]).expect("update");
    let (_, empty_hex, _) = testvectors::DIGEST_VECTORS
        .iter()
        .find(|(name, _, _)| *name == "SHA-256")
        .unwrap();
    assert_eq!(hex::encode(digest.digest().expect("digest")), *empty_hex);
}

#[test]
fn digest_into_rejects_short_buffer() {
    let provider = provider();
    let mut digest = provider.message_digest("SHA-256").expect("digest");
    let mut out = [0u8; 16];
    assert_eq!(
        digest.digest_into(&mut out),
        Err(NcpError::InsufficientBuffer {
            needed: 32,
            provided: 16
        })
    );
}

#[test]
fn aliases_resolve_to_the_same_algorithm() {
    let provider = provider();
    for (canonical, alias) in [("SHA-512", "SHA512"), ("SHA-224", "SHA224"), ("SHA1", "SHA")] {
        let mut a = provider.message_digest(canonical).expect(canonical);
        let mut b = provider.message_digest(alias).expect(alias);
        a.update(testvectors::FOX).expect("update");
        b.update(testvectors::FOX).expect("update");
        assert_eq!(
            a.digest().expect("digest"),
            b.digest().expect("digest"),
            "{canonical} vs {alias}"
        );
    }
}

#[test]
fn unknown_name_is_rejected() {
    let provider = provider();
    assert!(matches!(
        provider.message_digest("NO-SUCH-HASH"),
        Err(NcpError::UnsupportedAlgorithm(_))
    ));
}

#[test]
fn chunked_bulk_input() {
    let provider = provider();
    let chunk = vec![0xa5u8; testvectors::BULK_CHUNK];

    let mut sha256 = provider.message_digest("SHA-256").expect("digest");
    let mut sha512 = provider.message_digest("SHA-512").expect("digest");
    for _ in 0..testvectors::BULK_CHUNKS {
        sha256.update(&chunk).expect("update");
        sha512.update(&chunk).expect("update");
    }
    assert_eq!(
        hex::encode(sha256.digest().expect("digest")),
        testvectors::BULK_SHA256
    );
    assert_eq!(
        hex::encode(sha512.digest().expect("digest")),
        testvectors::BULK_SHA512
    );
}

#[test]
fn view_updates_consume_the_visible_span() {
    let provider = provider();
    let data = testvectors::FOX;

    // Every split point: feed data[..split] as prefix, then a view narrowed
    // to data[split..], and expect the digest of the whole message.
    for split in 0..=data.len() {
        let mut expected = provider.message_digest("SHA-256").expect("digest");
        expected.update(data).expect("update");
        let expected = expected.digest().expect("digest");

        let mut digest = provider.message_digest("SHA-256").expect("digest");
        digest.update(&data[..split]).expect("update");
        let mut view = ByteView::array(data);
        view.set_position(split);
        digest.update_view(&mut view).expect("update view");
        assert_eq!(view.position(), view.limit());
        assert!(!view.has_remaining());
        assert_eq!(digest.digest().expect("digest"), expected, "split {split}");
    }
}

#[test]
fn direct_array_and_opaque_views_agree() {
    struct Rope(Vec<Vec<u8>>);

    impl crate::OpaqueBytes for Rope {
        fn len(&self) -> usize {
            self.0.iter().map(Vec::len).sum()
        }

        fn copy_into(&self, offset: usize, dst: &mut [u8]) {
            let flat: Vec<u8> = self.0.iter().flatten().copied().collect();
            dst.copy_from_slice(&flat[offset..offset + dst.len()]);
        }
    }

    let provider = provider();
    let data = testvectors::FOX;
    let rope = Rope(vec![data[..10].to_vec(), data[10..].to_vec()]);

    let digest_of = |view: &mut ByteView<'_>| {
        let mut digest = provider.message_digest("SHA-256").expect("digest");
        digest.update_view(view).expect("update view");
        digest.digest().expect("digest")
    };

    let mut array_view = ByteView::array(data);
    let mut direct_view = unsafe { ByteView::direct(data.as_ptr(), data.len()) };
    let mut opaque_view = ByteView::opaque(&rope);

    let from_array = digest_of(&mut array_view);
    assert_eq!(digest_of(&mut direct_view), from_array);
    assert_eq!(digest_of(&mut opaque_view), from_array);
    assert_eq!(opaque_view.remaining(), 0);
}
