// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

//! Known-answer vectors shared across test modules.

/// Classic pangram message used by most digest vectors.
pub(crate) const FOX: &[u8] = b"The quick brown fox jumps over the lazy dog";

/// (public digest name, hex digest of the empty message, hex digest of FOX)
pub(crate) const DIGEST_VECTORS: &[(&str, &str, &str)] = &[
    (
        "MD5",
        "d41d8cd98f00b204e9800998ecf8427e",
        "9e107d9d372bb6826bd81d3542a419d6",
    ),
    (
        "SHA1",
        "da39a3ee5e6b4b0d3255bfef95601890afd80709",
        "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12",
    ),
    (
        "SHA-256",
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        "d7a8fbb307d7809469ca9abcb0082e4f8d5651e46d3cdb762d02d0bf37c9e592",
    ),
    (
        "SHA-384",
        "38b060a751ac96384cd9327eb1b1e36a21fdb71114be07434c0cc7bf63f6e1da274edebfe76f65fbd51ad2f14898b95b",
        "ca737f1014a48f4c0b6dd43cb177b0afd9e5169367544c494011e3317dbf9a509cb1e5dc1e85a941bbee3d7f2afbc9b1",
    ),
    (
        "SHA-512",
        "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e",
        "07e547d9586f6a73f73fbac0435ed76951218fb7d0c8d788a309d785436bbb642e93a252a954f23912547d1e8a3b5ed6e1bfd7097821233fa0538f3db854fee6",
    ),
    (
        "SHA3-256",
        "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a",
        "69070dda01975c8c120c3aada1b282394e7f032fa9cf32f4cb2259a0897dfc04",
    ),
    (
        "SHA3-512",
        "a69f73cca23a9ac5c8b567dc185a756e97c982164fe25859e0d1dcc1475c80a615b2123af1f5f94c11e3e9402c3ac558f500199d95b6d3e301758586281dcd26",
        "01dedd5de4ef14642445ba5f5b97c15e47b9ad931326e4b0727cd94cefc44fff23f07bf543139939b49128caf436dc1bdee54fcb24023a08d9403f9b4bf0d450",
    ),
    (
        "BLAKE2b512",
        "786a02f742015903c6c6fd852552d272912f4740e15847618a86e217f71f5419d25e1031afee585313896444934eb04b903a685b1448b755d56f701afe9be2ce",
        "a8add4bdddfd93e4877d2746e62817b116364a1fa7bc148d95090bc7333b3673f82401cf7aa2e4cb1ecd90296e3f14cb5413f8ed77be73045b13914cdcd6a918",
    ),
];

/// Truncated SHA-512 variants over FOX.
pub(crate) const SHA512_224_FOX: &str = "944cd2847fb54558d4775db0485a50003111c8e5daa63fe722c6aa37";
pub(crate) const SHA512_256_FOX: &str =
    "dd9d67b371519c339ed8dbd25af90e976a1eeefd4ad3d889005e532fc5bef04d";

/// 16 MiB of 0xa5, fed in 1 MiB chunks.
pub(crate) const BULK_CHUNK: usize = 1024 * 1024;
pub(crate) const BULK_CHUNKS: usize = 16;
pub(crate) const BULK_SHA256: &str =
    "69348f8a2ab1bcdf8d64752c92cb78a32faffadca3d8ae2b63e3e7a19a3e51fe";
pub(crate) const BULK_SHA512: &str =
    "7fcdd23072ea35f3bf9bc9911b72e5dbb7796d94fdc18ed9358ced99b015c56241d88d3bea6009c33b63853a91391c03179c177aaf4dfcd8ab266161fd5e941e";

/// RFC 4231 HMAC cases: (key, message, hex MAC for SHA-256, hex MAC for
/// SHA-512).
pub(crate) const HMAC_CASE_1_KEY: &[u8] = &[0x0b; 20];
pub(crate) const HMAC_CASE_1_MSG: &[u8] = b"Hi There";
pub(crate) const HMAC_CASE_1_SHA256: &str =
    "b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7";
pub(crate) const HMAC_CASE_1_SHA512: &str =
    "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cdedaa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854";

pub(crate) const HMAC_CASE_2_KEY: &[u8] = b"Jefe";
pub(crate) const HMAC_CASE_2_MSG: &[u8] = b"what do ya want for nothing?";
pub(crate) const HMAC_CASE_2_SHA256: &str =
    "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843";
